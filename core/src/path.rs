use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Weight};
use crate::traversal::{BreadthFirst, Frontier};

/// Resolve both path endpoints to keys owned by the graph.
fn endpoints<'g>(graph: &'g Graph, start: &str, end: &str) -> Result<(&'g str, &'g str)> {
    let s = graph.resolve(start).ok_or_else(|| {
        GraphError::invalid_argument(format!("start vertex '{start}' is not in the graph"))
    })?;
    let e = graph.resolve(end).ok_or_else(|| {
        GraphError::invalid_argument(format!("end vertex '{end}' is not in the graph"))
    })?;
    Ok((s, e))
}

/// Shortest path from `start` to `end` by edge count (BFS).
///
/// Returns the path including both endpoints, or `None` if `end` is not
/// reachable. The first dequeue of `end` fixes its distance: BFS visits
/// vertices in non-decreasing hop order. Among several shortest paths the
/// one returned depends on neighbor iteration order.
pub fn shortest_path<'g>(graph: &'g Graph, start: &str, end: &str) -> Result<Option<Vec<&'g str>>> {
    let (start, end) = endpoints(graph, start, end)?;

    let mut walk = BreadthFirst::new(graph, start, Frontier::Unvisited);
    for visit in walk.by_ref() {
        let visit = visit?;
        if visit.node == end {
            debug!(start, end, hops = visit.path.len() - 1, "shortest path found");
            return Ok(Some(visit.path));
        }
    }

    debug!(start, end, visited = walk.visited_count(), "no path");
    Ok(None)
}

/// Keep only the path entries that are not reviewers, according to the
/// caller's key convention.
pub fn products_only<'g, F>(path: &[&'g str], is_reviewer: F) -> Vec<&'g str>
where
    F: Fn(&str) -> bool,
{
    path.iter().copied().filter(|k| !is_reviewer(k)).collect()
}

/// Traversal cost of one edge: the reciprocal of its rating, so that a
/// cost-minimizing search prefers highly rated edges.
pub fn transformed_cost(weight: Weight) -> Result<f64> {
    if weight == 0 {
        return Err(GraphError::invalid_argument(
            "edge weight 0 has no finite transformed cost",
        ));
    }
    Ok(1.0 / f64::from(weight))
}

/// Total transformed cost along `path`. Every consecutive pair must be an edge.
pub fn path_cost(graph: &Graph, path: &[&str]) -> Result<f64> {
    path.windows(2).try_fold(0.0, |acc, pair| {
        Ok(acc + transformed_cost(graph.weight(pair[0], pair[1])?)?)
    })
}

/// Min-heap entry for Dijkstra. `BinaryHeap` is a max-heap, so ordering is
/// reversed on cost.
#[derive(Debug, Clone, Copy)]
struct HeapEntry<'g> {
    cost: f64,
    node: &'g str,
}

impl PartialEq for HeapEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry<'_> {}

impl PartialOrd for HeapEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

/// Rating-aware shortest path: Dijkstra over `1 / rating` edge costs.
///
/// Stale heap entries are skipped when popped rather than removed. If `end`
/// is unreachable the result is `None`; the predecessor walk only runs once
/// `end` has a finite distance, so a path always starts at `start`.
pub fn weighted_shortest_path<'g>(
    graph: &'g Graph,
    start: &str,
    end: &str,
) -> Result<Option<Vec<&'g str>>> {
    let (start, end) = endpoints(graph, start, end)?;

    // Missing entries are at infinite distance.
    let mut dist: HashMap<&'g str, f64> = HashMap::new();
    let mut prev: HashMap<&'g str, &'g str> = HashMap::new();
    let mut heap = BinaryHeap::new();

    dist.insert(start, 0.0);
    heap.push(HeapEntry { cost: 0.0, node: start });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if cost > dist.get(node).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        for (next, weight) in graph.weighted_neighbors(node)? {
            let candidate = cost + transformed_cost(weight)?;
            if candidate < dist.get(next).copied().unwrap_or(f64::INFINITY) {
                dist.insert(next, candidate);
                prev.insert(next, node);
                heap.push(HeapEntry { cost: candidate, node: next });
            }
        }
    }

    let Some(&total) = dist.get(end) else {
        debug!(start, end, "no weighted path");
        return Ok(None);
    };

    let mut path = vec![end];
    let mut current = end;
    while current != start {
        current = prev[current];
        path.push(current);
    }
    path.reverse();

    debug!(start, end, hops = path.len() - 1, cost = total, "weighted path found");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{
        from_index_pairs, from_weighted_index_pairs, make_chain, make_cycle, make_star,
        make_triangles, undirected,
    };
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_star_paths() {
        let g = make_star(4);
        assert_eq!(shortest_path(&g, "C", "L3").unwrap(), Some(vec!["C", "L3"]));
        assert_eq!(shortest_path(&g, "L1", "L2").unwrap(), Some(vec!["L1", "C", "L2"]));
    }

    #[test]
    fn test_shortest_path_self() {
        let g = make_chain(3);
        assert_eq!(shortest_path(&g, "n1", "n1").unwrap(), Some(vec!["n1"]));
    }

    #[test]
    fn test_shortest_path_disconnected() {
        let g = make_triangles();
        assert_eq!(shortest_path(&g, "A", "D").unwrap(), None);
    }

    #[test]
    fn test_shortest_path_unknown_endpoint() {
        let g = make_chain(3);
        assert!(matches!(
            shortest_path(&g, "n0", "zzz"),
            Err(GraphError::InvalidArgument(_))
        ));
        assert!(matches!(
            shortest_path(&g, "zzz", "n0"),
            Err(GraphError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_shortest_path_cycle() {
        let g = make_cycle(6);
        let path = shortest_path(&g, "n0", "n3").unwrap().unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], "n0");
        assert_eq!(path[3], "n3");
    }

    #[test]
    fn test_products_only() {
        let path = ["41742", "A1X", "100", "A2Y", "2065"];
        let products = products_only(&path, |k| k.starts_with('A'));
        assert_eq!(products, vec!["41742", "100", "2065"]);
    }

    /// Two 2-hop routes s-a-t and s-b-t; the b route carries better ratings.
    fn two_routes() -> Graph {
        undirected(&[("s", "a", 1), ("a", "t", 2), ("s", "b", 5), ("b", "t", 4)])
    }

    #[test]
    fn test_weighted_prefers_high_ratings() {
        let g = two_routes();
        let path = weighted_shortest_path(&g, "s", "t").unwrap().unwrap();
        assert_eq!(path, vec!["s", "b", "t"]);
        assert!(path_cost(&g, &path).unwrap() < path_cost(&g, &["s", "a", "t"]).unwrap());
    }

    #[test]
    fn test_weighted_takes_longer_route_when_cheaper() {
        // Direct rating-1 edge costs 1.0; three rating-5 hops cost 0.6.
        let g = undirected(&[
            ("s", "t", 1),
            ("s", "x", 5),
            ("x", "y", 5),
            ("y", "t", 5),
        ]);
        let path = weighted_shortest_path(&g, "s", "t").unwrap().unwrap();
        assert_eq!(path, vec!["s", "x", "y", "t"]);
        assert_eq!(shortest_path(&g, "s", "t").unwrap(), Some(vec!["s", "t"]));
    }

    #[test]
    fn test_weighted_unreachable_is_none() {
        let g = make_triangles();
        assert_eq!(weighted_shortest_path(&g, "A", "F").unwrap(), None);
    }

    #[test]
    fn test_weighted_self() {
        let g = two_routes();
        assert_eq!(weighted_shortest_path(&g, "a", "a").unwrap(), Some(vec!["a"]));
    }

    #[test]
    fn test_weighted_zero_weight_rejected() {
        let g = undirected(&[("s", "t", 0)]);
        assert!(matches!(
            weighted_shortest_path(&g, "s", "t"),
            Err(GraphError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_path_cost_missing_edge() {
        let g = two_routes();
        assert!(path_cost(&g, &["s", "t"]).is_err());
        assert_eq!(path_cost(&g, &["s"]).unwrap(), 0.0);
    }

    /// Exhaustive simple-path search: fewest edges from `a` to `b`.
    fn brute_force_hops(g: &Graph, a: &str, b: &str) -> Option<usize> {
        fn walk<'g>(g: &'g Graph, cur: &'g str, b: &str, on: &mut HashSet<&'g str>, best: &mut Option<usize>) {
            if cur == b {
                let hops = on.len() - 1;
                *best = Some(best.map_or(hops, |x| x.min(hops)));
                return;
            }
            for n in g.neighbors(cur).unwrap() {
                if on.insert(n) {
                    walk(g, n, b, on, best);
                    on.remove(n);
                }
            }
        }
        let a = g.resolve(a).unwrap();
        let mut on = HashSet::from([a]);
        let mut best = None;
        walk(g, a, b, &mut on, &mut best);
        best
    }

    /// Exhaustive simple-path search: lowest transformed cost from `a` to `b`.
    fn brute_force_cost(g: &Graph, a: &str, b: &str) -> Option<f64> {
        fn walk<'g>(
            g: &'g Graph,
            cur: &'g str,
            b: &str,
            cost: f64,
            on: &mut HashSet<&'g str>,
            best: &mut Option<f64>,
        ) {
            if cur == b {
                *best = Some(best.map_or(cost, |x| x.min(cost)));
                return;
            }
            for (n, w) in g.weighted_neighbors(cur).unwrap() {
                if on.insert(n) {
                    walk(g, n, b, cost + transformed_cost(w).unwrap(), on, best);
                    on.remove(n);
                }
            }
        }
        let a = g.resolve(a).unwrap();
        let mut on = HashSet::from([a]);
        let mut best = None;
        walk(g, a, b, 0.0, &mut on, &mut best);
        best
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_weighted_path_is_cheapest(
            n in 2usize..7,
            raw in prop::collection::vec((0usize..7, 0usize..7, 1u32..=5), 0..12),
        ) {
            let edges: Vec<(usize, usize, Weight)> =
                raw.into_iter().map(|(a, b, w)| (a % n, b % n, w)).collect();
            let g = from_weighted_index_pairs(n, &edges);
            let target = format!("v{}", n - 1);

            let found = weighted_shortest_path(&g, "v0", &target).unwrap();
            let expected = brute_force_cost(&g, "v0", &target);
            match (found, expected) {
                (Some(path), Some(best)) => {
                    prop_assert_eq!(path[0], "v0");
                    prop_assert_eq!(*path.last().unwrap(), target.as_str());
                    let cost = path_cost(&g, &path).unwrap();
                    prop_assert!((cost - best).abs() < 1e-9, "cost {} vs best {}", cost, best);
                }
                (None, None) => {}
                (found, expected) => {
                    prop_assert!(false, "found {:?}, brute force {:?}", found, expected);
                }
            }
        }

        #[test]
        fn prop_shortest_path_is_minimal(
            n in 2usize..8,
            raw in prop::collection::vec((0usize..8, 0usize..8), 0..14),
        ) {
            let pairs: Vec<(usize, usize)> =
                raw.into_iter().map(|(a, b)| (a % n, b % n)).collect();
            let g = from_index_pairs(n, &pairs);
            let target = format!("v{}", n - 1);

            let found = shortest_path(&g, "v0", &target).unwrap();
            let expected = brute_force_hops(&g, "v0", &target);
            prop_assert_eq!(found.map(|p| p.len() - 1), expected);
        }
    }
}
