use domain::BackendError;
use reqwest::StatusCode;

/// Errors raised by the HTTP backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API base URL `{0}`")]
    InvalidBaseUrl(String),
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
}

impl From<ApiError> for BackendError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Request(e) if e.is_decode() => BackendError::Decode(e.to_string()),
            ApiError::Request(e) => BackendError::Transport(e.to_string()),
            ApiError::Status(status) => BackendError::Status(status.as_u16()),
            e @ ApiError::InvalidBaseUrl(_) => BackendError::Transport(e.to_string()),
        }
    }
}
