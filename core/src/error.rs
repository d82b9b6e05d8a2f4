use thiserror::Error;

/// Errors raised by the graph store and the algorithms built on it.
///
/// "No path" is not an error: path finders return `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex (or edge) key that is not in the store.
    #[error("invalid reference: '{key}' is not in the graph")]
    InvalidReference { key: String },

    /// Caller misuse: unknown path endpoint, bad sample size, unusable weight.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GraphError {
    pub(crate) fn invalid_reference(key: impl Into<String>) -> Self {
        GraphError::InvalidReference { key: key.into() }
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        GraphError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
