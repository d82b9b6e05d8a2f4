use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::graph::Graph;
use crate::traversal::depth_first;

/// A connected component: its members in depth-first visitation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component<'g> {
    pub members: Vec<&'g str>,
}

impl<'g> Component<'g> {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// The first member visited, used as the component's example vertex.
    pub fn representative(&self) -> &'g str {
        self.members[0]
    }
}

/// Number of connected components. Mark-only: no member lists are built.
pub fn count_components(graph: &Graph) -> Result<usize> {
    let mut visited = HashSet::with_capacity(graph.vertex_count());
    let mut count = 0;

    for vertex in graph.vertices() {
        if !visited.contains(vertex) {
            depth_first(graph, vertex, &mut visited, |_| {})?;
            count += 1;
        }
    }

    Ok(count)
}

pub fn is_connected(graph: &Graph) -> Result<bool> {
    Ok(count_components(graph)? == 1)
}

/// Enumerate every connected component with its members.
///
/// Components partition the vertex set. Which component is discovered first,
/// and the member order inside each, follow the store's unspecified
/// iteration order.
pub fn components(graph: &Graph) -> Result<Vec<Component<'_>>> {
    let mut visited = HashSet::with_capacity(graph.vertex_count());
    let mut found = Vec::new();

    for vertex in graph.vertices() {
        if visited.contains(vertex) {
            continue;
        }
        let mut members = Vec::new();
        depth_first(graph, vertex, &mut visited, |v| members.push(v))?;
        found.push(Component { members });
    }

    debug!(
        vertices = graph.vertex_count(),
        components = found.len(),
        "enumerated components"
    );
    Ok(found)
}

/// The component with the most members. On ties the first one enumerated
/// wins. `None` for an empty graph.
pub fn largest_component(graph: &Graph) -> Result<Option<Component<'_>>> {
    Ok(pick_largest(components(graph)?))
}

/// Size and representative vertex of the component with the fewest members.
/// On ties the first one enumerated wins. `None` for an empty graph.
pub fn smallest_component(graph: &Graph) -> Result<Option<(usize, &str)>> {
    let found = components(graph)?;
    Ok(pick_smallest(&found))
}

fn pick_largest(found: Vec<Component<'_>>) -> Option<Component<'_>> {
    let mut best: Option<Component> = None;
    for c in found {
        if best.as_ref().map_or(true, |b| c.size() > b.size()) {
            best = Some(c);
        }
    }
    best
}

fn pick_smallest<'g>(found: &[Component<'g>]) -> Option<(usize, &'g str)> {
    let mut best: Option<&Component<'g>> = None;
    for c in found {
        if best.map_or(true, |b| c.size() < b.size()) {
            best = Some(c);
        }
    }
    best.map(|c| (c.size(), c.representative()))
}

/// Count, connectedness, largest and smallest component from one
/// enumeration pass.
#[derive(Debug, Clone)]
pub struct ComponentStats<'g> {
    pub count: usize,
    pub is_connected: bool,
    pub largest: Option<Component<'g>>,
    pub smallest: Option<(usize, &'g str)>,
}

impl<'g> ComponentStats<'g> {
    pub fn compute(graph: &'g Graph) -> Result<Self> {
        let found = components(graph)?;
        let count = found.len();
        let smallest = pick_smallest(&found);
        let largest = pick_largest(found);

        Ok(Self {
            count,
            is_connected: count == 1,
            largest,
            smallest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{from_index_pairs, make_chain, make_star, make_triangles, undirected};
    use proptest::prelude::*;

    #[test]
    fn test_star_single_component() {
        let g = make_star(4);
        assert_eq!(count_components(&g).unwrap(), 1);
        assert!(is_connected(&g).unwrap());

        let largest = largest_component(&g).unwrap().unwrap();
        assert_eq!(largest.size(), 5);
    }

    #[test]
    fn test_two_triangles() {
        let g = make_triangles();
        assert_eq!(count_components(&g).unwrap(), 2);
        assert!(!is_connected(&g).unwrap());

        let (size, rep) = smallest_component(&g).unwrap().unwrap();
        assert_eq!(size, 3);
        assert!(["A", "B", "C", "D", "E", "F"].contains(&rep));
    }

    #[test]
    fn test_smallest_is_isolated_vertex() {
        let mut g = make_star(3);
        g.add_vertex("lonely", None);

        let (size, rep) = smallest_component(&g).unwrap().unwrap();
        assert_eq!(size, 1);
        assert_eq!(rep, "lonely");

        let largest = largest_component(&g).unwrap().unwrap();
        assert_eq!(largest.size(), 4);
        assert!(!largest.members.contains(&"lonely"));
    }

    #[test]
    fn test_representative_is_first_member() {
        let g = undirected(&[("x", "y", 2)]);
        let found = components(&g).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].representative(), found[0].members[0]);
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::new();
        assert_eq!(count_components(&g).unwrap(), 0);
        assert!(!is_connected(&g).unwrap());
        assert!(largest_component(&g).unwrap().is_none());
        assert!(smallest_component(&g).unwrap().is_none());
    }

    #[test]
    fn test_stats_single_pass() {
        let mut g = make_triangles();
        g.add_vertex("solo", None);
        let stats = ComponentStats::compute(&g).unwrap();

        assert_eq!(stats.count, 3);
        assert!(!stats.is_connected);
        assert_eq!(stats.largest.unwrap().size(), 3);
        assert_eq!(stats.smallest, Some((1, "solo")));
    }

    #[test]
    fn test_stats_agree_with_individual_queries() {
        let g = make_chain(8);
        let stats = ComponentStats::compute(&g).unwrap();
        assert_eq!(stats.count, count_components(&g).unwrap());
        assert_eq!(stats.is_connected, is_connected(&g).unwrap());
        assert_eq!(
            stats.largest.map(|c| c.size()),
            largest_component(&g).unwrap().map(|c| c.size())
        );
    }

    proptest! {
        #[test]
        fn prop_components_partition_vertices(
            n in 1usize..40,
            raw in prop::collection::vec((0usize..40, 0usize..40), 0..60),
        ) {
            let pairs: Vec<(usize, usize)> =
                raw.into_iter().map(|(a, b)| (a % n, b % n)).collect();
            let g = from_index_pairs(n, &pairs);
            let found = components(&g).unwrap();

            let total: usize = found.iter().map(Component::size).sum();
            prop_assert_eq!(total, g.vertex_count());

            let mut seen = HashSet::new();
            for c in &found {
                for m in &c.members {
                    prop_assert!(seen.insert(*m), "vertex {} in two components", m);
                }
            }

            let count = count_components(&g).unwrap();
            prop_assert!(count >= 1);
            prop_assert_eq!(count, found.len());
            prop_assert_eq!(count == 1, is_connected(&g).unwrap());
            if count == 1 {
                prop_assert_eq!(largest_component(&g).unwrap().unwrap().size(), n);
            }
        }
    }
}
