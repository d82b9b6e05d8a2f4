//! Sampling-based diameter approximation.
//!
//! The per-start heuristic is a breadth-first walk that only rules out
//! cycles inside a single queue entry's path. Each vertex is still expanded
//! once, at its first dequeue, so the result is the longest path the walk
//! happens to reach, not the longest simple path in the graph (an NP-hard
//! problem in general). The sampled driver's cost is linear in the sample
//! size; picking a sample size that fits a time budget is up to the caller,
//! with [`extrapolate_exact_cost`] as a guide.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::traversal::{BreadthFirst, Frontier};

/// Longest path found by a simple-path breadth-first walk from `start`.
///
/// The path starts at `start`, never repeats a vertex, and among equally long
/// candidates the first one dequeued wins.
pub fn longest_simple_path_from<'g>(graph: &'g Graph, start: &str) -> Result<Vec<&'g str>> {
    let start = graph.resolve(start).ok_or_else(|| {
        GraphError::invalid_argument(format!("start vertex '{start}' is not in the graph"))
    })?;

    let mut longest: Vec<&'g str> = Vec::new();
    for visit in BreadthFirst::new(graph, start, Frontier::SimplePath) {
        let visit = visit?;
        if visit.path.len() > longest.len() {
            longest = visit.path;
        }
    }

    Ok(longest)
}

/// Outcome of [`approximate_diameter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiameterEstimate<'g> {
    /// Longest path found over all sampled starts.
    pub path: Vec<&'g str>,
    /// The sampled start vertices, in draw order.
    pub sampled: Vec<&'g str>,
}

impl DiameterEstimate<'_> {
    /// Estimated diameter in edges.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

fn sample_starts<'g, R>(members: &[&'g str], sample_size: usize, rng: &mut R) -> Result<Vec<&'g str>>
where
    R: Rng + ?Sized,
{
    if sample_size == 0 {
        return Err(GraphError::invalid_argument("sample size must be at least 1"));
    }
    if sample_size > members.len() {
        return Err(GraphError::invalid_argument(format!(
            "sample size {sample_size} exceeds component population {}",
            members.len()
        )));
    }
    Ok(members.choose_multiple(rng, sample_size).copied().collect())
}

fn keep_longest<'g>(paths: impl IntoIterator<Item = Vec<&'g str>>) -> Vec<&'g str> {
    paths.into_iter().fold(Vec::new(), |best, p| {
        if p.len() > best.len() {
            p
        } else {
            best
        }
    })
}

/// Estimate the diameter of a component by running
/// [`longest_simple_path_from`] from `sample_size` distinct members drawn
/// uniformly with `rng`, keeping the longest result.
///
/// Fails with `InvalidArgument` when `sample_size` is zero or larger than
/// `members`.
pub fn approximate_diameter<'g, R>(
    graph: &'g Graph,
    members: &[&'g str],
    sample_size: usize,
    rng: &mut R,
) -> Result<DiameterEstimate<'g>>
where
    R: Rng + ?Sized,
{
    let sampled = sample_starts(members, sample_size, rng)?;

    let mut paths = Vec::with_capacity(sampled.len());
    for &start in &sampled {
        let path = longest_simple_path_from(graph, start)?;
        debug!(start, len = path.len(), "sampled longest path");
        paths.push(path);
    }

    Ok(DiameterEstimate {
        path: keep_longest(paths),
        sampled,
    })
}

/// [`approximate_diameter`] with the per-sample walks spread over the rayon
/// pool. Starts are drawn from `rng` up front and ties resolve in draw order,
/// so the result equals the sequential one for the same `rng` state.
pub fn approximate_diameter_par<'g, R>(
    graph: &'g Graph,
    members: &[&'g str],
    sample_size: usize,
    rng: &mut R,
) -> Result<DiameterEstimate<'g>>
where
    R: Rng + ?Sized,
{
    let sampled = sample_starts(members, sample_size, rng)?;

    let paths: Vec<Vec<&'g str>> = sampled
        .par_iter()
        .map(|&start| longest_simple_path_from(graph, start))
        .collect::<Result<_>>()?;

    Ok(DiameterEstimate {
        path: keep_longest(paths),
        sampled,
    })
}

/// Project how long an exhaustive run (every member as a start) would take,
/// given the time `elapsed` for `sampled` starts.
pub fn extrapolate_exact_cost(elapsed: Duration, sampled: usize, population: usize) -> Duration {
    if sampled == 0 {
        return Duration::ZERO;
    }
    elapsed.mul_f64(population as f64 / sampled as f64)
}
