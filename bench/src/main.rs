use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use review_graph_core::{
    approximate_diameter, approximate_diameter_par, extrapolate_exact_cost, path_cost,
    products_only, shortest_path, weighted_shortest_path, Component, ComponentStats,
};
use review_graph_load::{load_path, GraphBuilder, LoadConfig, LoadedGraph};
use tracing::{info, warn};

mod generators;

use generators::{gen_barbell, gen_islands, gen_popular, gen_uniform, Generator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run every generator (default)
    All,
    /// Reviewers drawn uniformly per product
    Uniform,
    /// Preferential attachment to prolific reviewers
    Popular,
    /// Two communities joined by a thin bridge
    Barbell,
    /// Many small disjoint communities
    Islands,
}

#[derive(Debug, Parser)]
#[command(
    name = "review-graph-bench",
    about = "Time component, path and diameter queries on reviewer-product graphs"
)]
struct Args {
    /// Synthetic graph shape; ignored when --dataset is given
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Number of products in synthetic graphs
    #[arg(long, env = "REVIEW_GRAPH_PRODUCTS", default_value_t = 50_000)]
    products: u64,

    /// JSON-lines product dataset to load instead of generating one
    #[arg(long, env = "REVIEW_GRAPH_DATASET")]
    dataset: Option<PathBuf>,

    /// JSON file with load settings
    #[arg(long, env = "REVIEW_GRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the load memory cap
    #[arg(long, env = "REVIEW_GRAPH_MAX_MEMORY_MB")]
    max_memory_mb: Option<usize>,

    /// Start vertices sampled for the diameter estimate
    #[arg(long, env = "REVIEW_GRAPH_SAMPLE_SIZE", default_value_t = 5)]
    samples: usize,

    /// Seed for generators and diameter sampling
    #[arg(long, env = "REVIEW_GRAPH_SEED", default_value_t = 42)]
    seed: u64,

    /// Run diameter samples on the rayon pool
    #[arg(long)]
    parallel: bool,

    /// Path source product (defaults to one picked from the largest component)
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Path target product
    #[arg(long, requires = "from")]
    to: Option<String>,
}

fn main() -> Result<()> {
    // Logs go to stderr; the result table owns stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LoadConfig::from_json_file(path)
            .with_context(|| format!("reading load config {}", path.display()))?,
        None => LoadConfig::default(),
    };
    if args.max_memory_mb.is_some() {
        config.max_memory_mb = args.max_memory_mb;
    }

    println!("review-graph-bench");
    println!("==================");
    println!();

    if let Some(dataset) = &args.dataset {
        info!(path = %dataset.display(), "loading dataset");
        let loaded = load_path(dataset, &config)
            .with_context(|| format!("loading dataset {}", dataset.display()))?;
        return run_benchmark(&dataset.display().to_string(), &loaded, &config, &args);
    }

    let generators: Vec<(&str, Generator)> = match args.mode {
        Mode::Uniform => vec![("Uniform reviewers", gen_uniform as Generator)],
        Mode::Popular => vec![("Popular reviewers (preferential)", gen_popular as Generator)],
        Mode::Barbell => vec![("Barbell (community-bridge-community)", gen_barbell as Generator)],
        Mode::Islands => vec![("Islands (disjoint communities)", gen_islands as Generator)],
        Mode::All => vec![
            ("Uniform reviewers", gen_uniform as Generator),
            ("Popular reviewers (preferential)", gen_popular as Generator),
            ("Barbell (community-bridge-community)", gen_barbell as Generator),
            ("Islands (disjoint communities)", gen_islands as Generator),
        ],
    };

    for (name, generator) in generators {
        let mut builder = GraphBuilder::new(config.clone())?;
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        generator(&mut builder, args.products, &mut rng)
            .with_context(|| format!("generating {name}"))?;
        let loaded = builder.finish()?;
        run_benchmark(name, &loaded, &config, &args)?;
    }

    Ok(())
}

fn run_benchmark(name: &str, loaded: &LoadedGraph, config: &LoadConfig, args: &Args) -> Result<()> {
    let graph = &loaded.graph;
    let stats = &loaded.stats;

    println!("--- {} ---", name);
    println!(
        "Built in {:.2}s: {} products, {} reviewers, {} directed edges, ~{:.0}MB",
        stats.load_time_ms / 1000.0,
        stats.products,
        stats.reviewers,
        stats.edges,
        stats.memory_bytes as f64 / 1_048_576.0
    );

    // Components
    let t = Instant::now();
    let components = ComponentStats::compute(graph)?;
    println!(
        "Components: {} (connected: {}) in {:.1}ms",
        components.count,
        components.is_connected,
        t.elapsed().as_secs_f64() * 1000.0
    );
    if let Some((size, representative)) = components.smallest {
        println!("  smallest: {} vertices, e.g. {}", size, representative);
    }
    let Some(largest) = components.largest else {
        println!("  empty graph, nothing else to measure");
        println!();
        return Ok(());
    };
    println!("  largest:  {} vertices", largest.size());

    // Paths
    let endpoints = match (&args.from, &args.to) {
        (Some(from), Some(to)) => Some((from.clone(), to.clone())),
        _ => pick_endpoints(&largest, config),
    };
    match endpoints {
        Some((from, to)) => run_paths(loaded, config, &from, &to)?,
        None => println!("Paths: fewer than two products in the largest component, skipped"),
    }

    // Diameter
    let samples = effective_sample_size(args.samples, largest.size());
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let t = Instant::now();
    let estimate = if args.parallel {
        approximate_diameter_par(graph, &largest.members, samples, &mut rng)?
    } else {
        approximate_diameter(graph, &largest.members, samples, &mut rng)?
    };
    let elapsed = t.elapsed();
    println!(
        "Diameter: at least {} hops ({} vertices) from {} samples in {:.2}s",
        estimate.hops(),
        estimate.path.len(),
        samples,
        elapsed.as_secs_f64()
    );
    let exhaustive = extrapolate_exact_cost(elapsed, samples, largest.size());
    println!(
        "  sampling all {} members would take ~{:.1} min",
        largest.size(),
        exhaustive.as_secs_f64() / 60.0
    );
    println!();

    Ok(())
}

/// Clamp a requested diameter sample size into `1..=population`.
fn effective_sample_size(requested: usize, population: usize) -> usize {
    if requested == 0 {
        warn!("sample size 0 requested, sampling one start instead");
        return 1;
    }
    if requested > population {
        warn!(
            requested,
            population, "sample size larger than the component, using every member"
        );
        return population;
    }
    requested
}

/// First and last product key (lexicographic) of a component.
fn pick_endpoints(component: &Component<'_>, config: &LoadConfig) -> Option<(String, String)> {
    let mut products: Vec<&str> = component
        .members
        .iter()
        .copied()
        .filter(|k| !config.is_reviewer(k))
        .collect();
    if products.len() < 2 {
        return None;
    }
    products.sort_unstable();
    Some((products[0].to_string(), products[products.len() - 1].to_string()))
}

fn run_paths(loaded: &LoadedGraph, config: &LoadConfig, from: &str, to: &str) -> Result<()> {
    let graph = &loaded.graph;

    let t = Instant::now();
    let path = shortest_path(graph, from, to)
        .with_context(|| format!("shortest path {from} → {to}"))?;
    let elapsed = t.elapsed();
    match path {
        Some(p) => {
            println!(
                "Shortest path {} → {}: {} hops in {:.1}ms",
                from,
                to,
                p.len() - 1,
                elapsed.as_secs_f64() * 1000.0
            );
            println!("  products only: {:?}", products_only(&p, |k| config.is_reviewer(k)));
        }
        None => println!(
            "Shortest path {} → {}: no path ({:.1}ms)",
            from,
            to,
            elapsed.as_secs_f64() * 1000.0
        ),
    }

    let t = Instant::now();
    let weighted = weighted_shortest_path(graph, from, to)
        .with_context(|| format!("weighted path {from} → {to}"))?;
    let elapsed = t.elapsed();
    match weighted {
        Some(p) => println!(
            "Rating-weighted path: {} hops, cost {:.3} in {:.1}ms",
            p.len() - 1,
            path_cost(graph, &p)?,
            elapsed.as_secs_f64() * 1000.0
        ),
        None => println!(
            "Rating-weighted path: no path ({:.1}ms)",
            elapsed.as_secs_f64() * 1000.0
        ),
    }

    Ok(())
}
