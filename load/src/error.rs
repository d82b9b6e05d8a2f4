use review_graph_core::GraphError;
use thiserror::Error;

/// Ingestion errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A dataset line that is not a valid product record (1-based line number).
    #[error("line {line}: malformed product record: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("product {product}: rating {rating} from reviewer {reviewer} is outside {min}..={max}")]
    InvalidRating {
        product: String,
        reviewer: String,
        rating: u32,
        min: u32,
        max: u32,
    },

    #[error("{count} edges reference vertices that were never registered")]
    DanglingEdges { count: usize },

    #[error("loaded graph uses {used_mb}MB, exceeds max_memory_mb={max_mb}MB")]
    MemoryLimit { used_mb: usize, max_mb: usize },

    #[error("invalid load configuration: {0}")]
    Config(String),

    #[error("malformed load configuration: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T> = std::result::Result<T, LoadError>;
