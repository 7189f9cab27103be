use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a GitLab call can fail with.
///
/// Nothing is retried: the caller decides what to do with each kind.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was rejected locally, before any I/O happened.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// GitLab answered with a non-success status.
    #[error("GitLab API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The HTTP call itself failed (DNS, connect, timeout, reset).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// HTTP status for API errors, or for transport errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
