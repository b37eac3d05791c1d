use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors raised while extracting an example from a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A schema node was absent, `null` or otherwise falsy.
    #[error("invalid schema at `{path}`: missing schema")]
    InvalidSchema {
        /// Keyword trail leading to the missing node.
        path: String,
    },

    /// The configured recursion limit was reached.
    #[error("maximum extraction depth {limit} exceeded at `{path}`")]
    DepthExceeded {
        /// Configured limit.
        limit: usize,
        /// Keyword trail leading to the node that crossed the limit.
        path: String,
    },
}

impl ExtractError {
    pub(crate) fn invalid_schema(path: impl Into<String>) -> Self {
        Self::InvalidSchema { path: path.into() }
    }

    pub(crate) fn depth_exceeded(limit: usize, path: impl Into<String>) -> Self {
        Self::DepthExceeded {
            limit,
            path: path.into(),
        }
    }
}
