use reqwest::StatusCode;
use thiserror::Error;

/// Reasons a timeframe expression or a custom range date is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid timeframe `{0}`")]
    InvalidExpression(String),

    #[error("`{0}` is not a date (expected YYYY, YYYY-MM, YYYY-MM-DD or YYYYMMDD)")]
    Malformed(String),

    #[error("date cannot be in the future")]
    FutureDate,

    #[error("end date cannot be earlier than start date")]
    EndBeforeStart,

    #[error("a custom range needs a start and an end date")]
    CustomRangeRequired,
}

#[derive(Error, Debug)]
pub enum ClipError {
    #[error("authentication failed: client id or secret rejected")]
    AuthenticationFailed,

    #[error("channel `{0}` not found")]
    BroadcasterNotFound(String),

    #[error("game `{0}` not found")]
    GameNotFound(String),

    #[error(transparent)]
    Date(#[from] DateError),

    #[error("cannot open {path} for writing: {source}")]
    FileUnwritable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("clip retrieval cancelled")]
    Cancelled,

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipError {
    /// True for failures the interactive shell answers with a fresh prompt.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClipError::AuthenticationFailed
                | ClipError::BroadcasterNotFound(_)
                | ClipError::GameNotFound(_)
                | ClipError::Date(_)
                | ClipError::FileUnwritable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClipError>;
