use shared::error::ErrorCode;
use thiserror::Error;

/// Shown when the backend gives us nothing better to display.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
/// Used for a 401 whose body carries no message.
pub const SESSION_EXPIRED_MESSAGE: &str = "session expired; please sign in again";

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("unexpected response payload: {0}")]
    Decode(String),
    #[error("{0}")]
    Validation(String),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("token storage error: {0}")]
    Storage(String),
    #[error("request cancelled")]
    Cancelled,
}

impl ClientError {
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Status { status, .. } => Some(ErrorCode::from_status(*status)),
            Self::Unauthorized { .. } | Self::NotLoggedIn => Some(ErrorCode::Unauthorized),
            Self::Validation(_) => Some(ErrorCode::Validation),
            _ => None,
        }
    }

    /// Text for an inline banner.
    pub fn display_message(&self) -> String {
        match self {
            Self::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Status { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::Unauthorized { message } if !message.trim().is_empty() => message.clone(),
            Self::Unauthorized { .. } => SESSION_EXPIRED_MESSAGE.to_string(),
            Self::Transport(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            Self::Decode(_) => "The server returned an unexpected response.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn requires_reauth(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::NotLoggedIn)
    }
}

impl From<anyhow::Error> for ClientError {
    fn from(value: anyhow::Error) -> Self {
        Self::Storage(format!("{value:#}"))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(value: url::ParseError) -> Self {
        Self::Validation(format!("invalid url: {value}"))
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
