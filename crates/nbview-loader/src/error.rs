//! Load errors, one human-readable message each.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("not a notebook file: `{0}` (expected a .ipynb file)")]
    WrongExtension(String),

    #[error("failed to read notebook: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse notebook JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("file not found")]
    NotFound,

    #[error("API rate limit reached or authentication required")]
    RateLimited,

    #[error("remote API error: HTTP {0}")]
    Status(u16),

    #[error("unexpected response payload: {0}")]
    Payload(String),

    #[error("invalid repository reference: `{0}`")]
    InvalidRepo(String),
}

impl LoadError {
    /// Maps a non-success HTTP status to the matching error.
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            403 => Self::RateLimited,
            other => Self::Status(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_http_statuses() {
        assert!(matches!(LoadError::from_status(404), LoadError::NotFound));
        assert!(matches!(LoadError::from_status(403), LoadError::RateLimited));
        assert!(matches!(LoadError::from_status(500), LoadError::Status(500)));
        assert_eq!(LoadError::from_status(502).to_string(), "remote API error: HTTP 502");
    }
}
