use thiserror::Error;

/// Failure reported by the upstream AnyList client.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid upstream payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Credentials file error: {0}")]
    Credentials(#[from] std::io::Error),
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Other(String),
}

impl UpstreamError {
    /// Creates a status error with the given message.
    pub fn status(status: u16, message: &str) -> Self {
        UpstreamError::Status {
            status,
            message: message.to_string(),
        }
    }

    /// HTTP status attached to the failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for forwarding to API callers.
    pub fn message(&self) -> String {
        match self {
            UpstreamError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
