use store::ImageError;
use thiserror::Error;

/// Failure of a call to the fleet API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),
    /// The session was rejected and has already been cleared.
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,
    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,
    #[error("Not found")]
    NotFound,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl ApiError {
    /// Text for a toast: the server's message when it sent one, otherwise
    /// `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Unauthorized | ApiError::RateLimited | ApiError::Image(_) => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
