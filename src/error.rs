use thiserror::Error;

/// The main error type for modelfetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Invalid source '{input}': {message}")]
    InvalidSource { input: String, message: String },

    #[error("Hub fetch failed for '{repo_id}': {message}")]
    HubFetch { repo_id: String, message: String },

    #[error("Transfer failed for '{url}': {message}")]
    Transfer { url: String, message: String },
}
