//! review-graph-core: in-memory reviewer–product graph engine.
//!
//! A string-keyed weighted adjacency store plus the algorithms run against
//! it once it is built: connected components, unweighted and rating-weighted
//! shortest paths, and a sampling diameter estimate. Every algorithm walks
//! the graph through the two primitives in `traversal`.
//!
//! The store is populated once and only read afterwards. Ingestion of a
//! concrete dataset lives in `review-graph-load`.

mod components;
mod diameter;
mod error;
mod graph;
mod path;
mod traversal;

#[cfg(test)]
mod test_util;

pub use components::{
    components, count_components, is_connected, largest_component, smallest_component, Component,
    ComponentStats,
};
pub use diameter::{
    approximate_diameter, approximate_diameter_par, extrapolate_exact_cost,
    longest_simple_path_from, DiameterEstimate,
};
pub use error::{GraphError, Result};
pub use graph::{AttrValue, Attributes, Graph, Weight};
pub use path::{
    path_cost, products_only, shortest_path, transformed_cost, weighted_shortest_path,
};
pub use traversal::{depth_first, BreadthFirst, Frontier, Visit};
