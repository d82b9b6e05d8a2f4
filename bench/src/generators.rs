//! Synthetic reviewer–product datasets, all seeded and single-threaded.
//!
//! Every generator emits `ProductRecord`s through a `GraphBuilder`, the same
//! path a real dataset takes.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use review_graph_load::{GraphBuilder, ProductId, ProductRecord, Result};

pub type Generator = fn(&mut GraphBuilder, u64, &mut ChaCha8Rng) -> Result<()>;

const GROUPS: [&str; 4] = ["Book", "Music", "DVD", "Video"];

fn reviewer(i: u64) -> String {
    format!("A{i:08}")
}

fn rating(rng: &mut ChaCha8Rng) -> u32 {
    rng.gen_range(1..=5)
}

fn product(id: u64, reviewers: Vec<(String, u32)>) -> ProductRecord {
    ProductRecord {
        id: ProductId::Number(id),
        title: Some(format!("Product {id}")),
        group: Some(GROUPS[(id % GROUPS.len() as u64) as usize].to_string()),
        categories: Vec::new(),
        reviewers,
    }
}

/// Uniform: each product is rated by 1–6 reviewers drawn uniformly from a
/// pool half the size of the catalogue. Baseline with no structure.
pub fn gen_uniform(builder: &mut GraphBuilder, products: u64, rng: &mut ChaCha8Rng) -> Result<()> {
    let pool = (products / 2).max(1);
    for id in 0..products {
        let count = rng.gen_range(1..=6);
        let reviewers = (0..count)
            .map(|_| (reviewer(rng.gen_range(0..pool)), rating(rng)))
            .collect();
        builder.add_record(&product(id, reviewers))?;
    }
    Ok(())
}

/// Popular reviewers: preferential attachment by sampling the list of past
/// ratings, so prolific reviewers keep getting more products (hub-and-spoke).
pub fn gen_popular(builder: &mut GraphBuilder, products: u64, rng: &mut ChaCha8Rng) -> Result<()> {
    let per_product = 4u64;
    let mut next_reviewer = 0u64;
    // One entry per past rating: picking uniformly is picking by activity.
    let mut activity: Vec<u64> = Vec::with_capacity((products * per_product) as usize);

    for id in 0..products {
        let mut reviewers = Vec::with_capacity(per_product as usize);
        for _ in 0..per_product {
            let who = if activity.is_empty() || rng.gen_bool(0.2) {
                next_reviewer += 1;
                next_reviewer - 1
            } else {
                activity[rng.gen_range(0..activity.len())]
            };
            activity.push(who);
            reviewers.push((reviewer(who), rating(rng)));
        }
        builder.add_record(&product(id, reviewers))?;
    }
    Ok(())
}

/// Barbell: two dense reviewer communities joined by a thin chain of bridge
/// products, each sharing one reviewer with the next. Long paths through a
/// single bottleneck. Writes exactly `products` products.
pub fn gen_barbell(builder: &mut GraphBuilder, products: u64, rng: &mut ChaCha8Rng) -> Result<()> {
    let bridge_len = 10u64.min(products / 3);
    let side_a = (products - bridge_len) / 2;
    let side_b = products - bridge_len - side_a;
    let pool = (side_a / 4).max(1);

    // Community A: products 0..side_a, reviewers 0..pool. The first product
    // always carries reviewer 0, the bridge's left anchor.
    for id in 0..side_a {
        let mut reviewers: Vec<(String, u32)> = (0..5)
            .map(|_| (reviewer(rng.gen_range(0..pool)), rating(rng)))
            .collect();
        if id == 0 {
            reviewers[0].0 = reviewer(0);
        }
        builder.add_record(&product(id, reviewers))?;
    }

    // Bridge: product b_i shares reviewer `bridge_i` with b_{i+1}; the ends
    // borrow one reviewer from each community.
    let bridge_start = side_a;
    let bridge_reviewer = |i: u64| format!("A_bridge_{i}");
    for i in 0..bridge_len {
        let id = bridge_start + i;
        let left = if i == 0 { reviewer(0) } else { bridge_reviewer(i - 1) };
        let right = if i == bridge_len - 1 {
            reviewer(pool)
        } else {
            bridge_reviewer(i)
        };
        builder.add_record(&product(id, vec![(left, rating(rng)), (right, rating(rng))]))?;
    }

    // Community B: reviewers pool..2*pool, first product anchored on `pool`.
    let b_start = bridge_start + bridge_len;
    for i in 0..side_b {
        let mut reviewers: Vec<(String, u32)> = (0..5)
            .map(|_| (reviewer(pool + rng.gen_range(0..pool)), rating(rng)))
            .collect();
        if i == 0 {
            reviewers[0].0 = reviewer(pool);
        }
        builder.add_record(&product(b_start + i, reviewers))?;
    }
    Ok(())
}

/// Islands: many small disjoint communities of 5 products and 3 reviewers,
/// plus the occasional product nobody reviewed. Many components.
pub fn gen_islands(builder: &mut GraphBuilder, products: u64, rng: &mut ChaCha8Rng) -> Result<()> {
    let mut id = 0u64;
    let mut island = 0u64;
    while id < products {
        if rng.gen_range(0..20) == 0 {
            builder.add_record(&product(id, Vec::new()))?;
            id += 1;
            continue;
        }
        for _ in 0..5 {
            if id >= products {
                break;
            }
            let reviewers = (0..3)
                .map(|r| (reviewer(island * 3 + r), rating(rng)))
                .collect();
            builder.add_record(&product(id, reviewers))?;
            id += 1;
        }
        island += 1;
    }
    Ok(())
}
