pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Tree JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {field} on node {node:?}: {message}")]
    InvalidScore {
        node: String,
        field: &'static str,
        message: String,
    },

    #[error("Non-finite {field} on node {node:?}")]
    NonFiniteScore { node: String, field: &'static str },
}
