//! Error types for the App Store Connect client, pagination, and output layers.

use thiserror::Error;

/// Failure to fold one page into the aggregated result.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("missing Data field for {type_name}")]
    MissingData { type_name: &'static str },

    #[error("type mismatch: page is {page} but result is {result}")]
    TypeMismatch {
        page: &'static str,
        result: &'static str,
    },
}

/// What went wrong on a given page.
#[derive(Debug, Error)]
pub enum PageErrorKind {
    /// The same `next` cursor was seen twice in one walk.
    #[error("repeated pagination URL")]
    RepeatedPaginationUrl,

    #[error("unexpected response type (expected {expected}, got {got})")]
    UnexpectedResponseType {
        expected: &'static str,
        got: &'static str,
    },

    #[error(transparent)]
    Aggregation(#[from] AggregateError),

    #[error(transparent)]
    Fetch(Box<ApiError>),
}

/// Pagination failure annotated with the 1-based page it happened on.
#[derive(Debug, Error)]
#[error("page {page}: {kind}")]
pub struct PaginationError {
    pub page: usize,
    pub kind: PageErrorKind,
}

impl PaginationError {
    pub fn new(page: usize, kind: PageErrorKind) -> Self {
        Self { page, kind }
    }

    /// True when the walk stopped because a `next` cursor repeated.
    pub fn is_repeated_url(&self) -> bool {
        matches!(self.kind, PageErrorKind::RepeatedPaginationUrl)
    }

    /// The collaborator error, when the failure came from fetching a page.
    pub fn fetch_error(&self) -> Option<&ApiError> {
        match &self.kind {
            PageErrorKind::Fetch(err) => Some(err),
            _ => None,
        }
    }
}

/// Output rendering errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("{0}")]
    Handler(String),

    #[error("output handler for {expected} received a different type")]
    HandlerType { expected: &'static str },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("--pretty is only valid with JSON output")]
    PrettyRequiresJson,

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Client, configuration, and command errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("App Store Connect returned {status}: {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("refusing to follow pagination URL {url}: {reason}")]
    DisallowedUrl { url: String, reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("request cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
