//! review-graph-load: builds a `review_graph_core::Graph` from a
//! reviewer–product dataset.
//!
//! The dataset is JSON lines, one product per line:
//!
//! ```text
//! {"id": 2, "title": "...", "group": "Book", "categories": ["..."], "reviewers": [["A11NCO6YTE4BTJ", 5]]}
//! ```
//!
//! Construction is explicit: nothing is loaded until `load_products` or
//! `load_path` is called, and the result is an owned graph.

mod config;
mod error;
mod load;

pub use config::LoadConfig;
pub use error::{LoadError, Result};
pub use load::{load_path, load_products, GraphBuilder, LoadStats, LoadedGraph, ProductId, ProductRecord};
