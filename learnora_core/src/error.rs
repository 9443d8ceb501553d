use thiserror::Error;

/// Errors returned by the REST transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or body decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidUrl(_) => None,
        }
    }
}
