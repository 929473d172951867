use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single log fetch attempt
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network unreachable, DNS failure, timeout, connection reset
    #[error("Failed to fetch logs: {0}")]
    Transport(#[source] reqwest::Error),

    /// Endpoint answered with a non-2xx status.
    ///
    /// The status is kept for diagnostics only; the reason string shown to
    /// the user stays generic.
    #[error("Network response was not ok")]
    HttpStatus(StatusCode),

    /// Body was not a JSON array of log records
    #[error("Failed to decode logs: {0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    /// Short machine-friendly kind, used as a tracing field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::HttpStatus(_) => "http_status",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}
