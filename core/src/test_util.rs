//! Small, fully specified graphs shared by the unit tests.

use crate::graph::{Graph, Weight};

/// Build an undirected graph from `(a, b, weight)` triples, inserting both
/// directions per edge.
pub fn undirected(edges: &[(&str, &str, Weight)]) -> Graph {
    let mut g = Graph::new();
    for &(a, b, w) in edges {
        g.add_vertex(a, None);
        g.add_vertex(b, None);
        g.add_edge(a, b, w).unwrap();
        g.add_edge(b, a, w).unwrap();
    }
    g
}

/// Center `C` with leaves `L1..=Ln`, all weight 1.
pub fn make_star(leaves: usize) -> Graph {
    let names: Vec<String> = (1..=leaves).map(|i| format!("L{i}")).collect();
    let edges: Vec<(&str, &str, Weight)> = names.iter().map(|l| ("C", l.as_str(), 1)).collect();
    undirected(&edges)
}

/// Path `n0 - n1 - ... - n{len-1}`, all weight 1.
pub fn make_chain(len: usize) -> Graph {
    let names: Vec<String> = (0..len).map(|i| format!("n{i}")).collect();
    let edges: Vec<(&str, &str, Weight)> = names
        .windows(2)
        .map(|w| (w[0].as_str(), w[1].as_str(), 1))
        .collect();
    let mut g = undirected(&edges);
    if len == 1 {
        g.add_vertex("n0", None);
    }
    g
}

/// Ring `n0 - n1 - ... - n{len-1} - n0`, all weight 1.
pub fn make_cycle(len: usize) -> Graph {
    let names: Vec<String> = (0..len).map(|i| format!("n{i}")).collect();
    let edges: Vec<(&str, &str, Weight)> = (0..len)
        .map(|i| (names[i].as_str(), names[(i + 1) % len].as_str(), 1))
        .collect();
    undirected(&edges)
}

/// Two disjoint triangles `A-B-C` and `D-E-F`, all weight 1.
pub fn make_triangles() -> Graph {
    undirected(&[
        ("A", "B", 1),
        ("B", "C", 1),
        ("C", "A", 1),
        ("D", "E", 1),
        ("E", "F", 1),
        ("F", "D", 1),
    ])
}

/// Random undirected graph over `n` vertices from an explicit edge list of
/// index pairs; isolated indices still become vertices.
pub fn from_index_pairs(n: usize, pairs: &[(usize, usize)]) -> Graph {
    let weighted: Vec<(usize, usize, Weight)> = pairs.iter().map(|&(a, b)| (a, b, 1)).collect();
    from_weighted_index_pairs(n, &weighted)
}

/// [`from_index_pairs`] with an explicit weight per edge. A repeated pair
/// keeps the last weight.
pub fn from_weighted_index_pairs(n: usize, edges: &[(usize, usize, Weight)]) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_vertex(&format!("v{i}"), None);
    }
    for &(a, b, w) in edges {
        if a == b {
            continue;
        }
        let (ka, kb) = (format!("v{a}"), format!("v{b}"));
        g.add_edge(&ka, &kb, w).unwrap();
        g.add_edge(&kb, &ka, w).unwrap();
    }
    g
}
