use thiserror::Error;

pub type Result<T, E = ChesswatchError> = std::result::Result<T, E>;

/// Unified error type covering fetch, data and operational failures.
#[derive(Debug, Error)]
pub enum ChesswatchError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },
    #[error("http status {status} for {url}")]
    Http { status: u16, url: String },
    #[error("unexpected data shape: {0}")]
    DataShape(String),
    #[error("output error: {0}")]
    Output(String),
    #[error("operational error: {0}")]
    Ops(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChesswatchError {
    /// True for failures that happened while talking to the upstream API.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ChesswatchError::Transport { .. } | ChesswatchError::Http { .. }
        )
    }
}
