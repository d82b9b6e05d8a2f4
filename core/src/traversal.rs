use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::graph::Graph;

/// Iterative depth-first walk from `start`, marking everything reachable in
/// `visited` and calling `on_visit` once per newly visited vertex.
///
/// Neighbors are pushed unconditionally and filtered when popped, so the
/// stack may hold duplicates. Mark-only callers pass a no-op visitor;
/// collecting callers push into a list. Both see exactly the same vertices.
pub fn depth_first<'g, F>(
    graph: &'g Graph,
    start: &'g str,
    visited: &mut HashSet<&'g str>,
    mut on_visit: F,
) -> Result<()>
where
    F: FnMut(&'g str),
{
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        on_visit(current);
        stack.extend(graph.neighbors(current)?);
    }

    Ok(())
}

/// Which neighbors a breadth-first walk puts on its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontier {
    /// Neighbors not yet visited anywhere in the walk.
    Unvisited,
    /// Neighbors not already on the path carried by the queue entry. A vertex
    /// can be queued again through a different branch.
    SimplePath,
}

/// A vertex reached by [`BreadthFirst`], with the path that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit<'g> {
    pub node: &'g str,
    /// `start ..= node`, inclusive of both ends.
    pub path: Vec<&'g str>,
}

/// Lazy breadth-first walk yielding each vertex once, with its path.
///
/// Every queue entry carries its own copy of the path rather than a parent
/// pointer: shortest-path search and the longest-path heuristic stop on
/// different conditions and both need the full path at the stopping point.
/// A vertex is yielded the first time it is dequeued; later dequeues of the
/// same vertex are dropped.
pub struct BreadthFirst<'g> {
    graph: &'g Graph,
    frontier: Frontier,
    queue: VecDeque<(&'g str, Vec<&'g str>)>,
    visited: HashSet<&'g str>,
}

impl<'g> BreadthFirst<'g> {
    pub fn new(graph: &'g Graph, start: &'g str, frontier: Frontier) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back((start, vec![start]));
        Self {
            graph,
            frontier,
            queue,
            visited: HashSet::new(),
        }
    }

    /// Number of distinct vertices yielded so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

impl<'g> Iterator for BreadthFirst<'g> {
    type Item = Result<Visit<'g>>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, path)) = self.queue.pop_front() {
            if !self.visited.insert(node) {
                continue;
            }

            let neighbors = match self.graph.neighbors(node) {
                Ok(n) => n,
                Err(e) => {
                    self.queue.clear();
                    return Some(Err(e));
                }
            };

            for next in neighbors {
                let admit = match self.frontier {
                    Frontier::Unvisited => !self.visited.contains(next),
                    Frontier::SimplePath => !path.contains(&next),
                };
                if admit {
                    let mut extended = Vec::with_capacity(path.len() + 1);
                    extended.extend_from_slice(&path);
                    extended.push(next);
                    self.queue.push_back((next, extended));
                }
            }

            return Some(Ok(Visit { node, path }));
        }

        None
    }
}
