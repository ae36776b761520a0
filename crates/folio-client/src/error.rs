use thiserror::Error;

/// Result of fetching one source: the parsed payload or the reason it failed.
pub type SourceResult<T> = Result<T, SourceError>;

/// Why a single source fetch failed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network, DNS, TLS, or timeout failure from the underlying HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The body was not JSON or did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed but lacks a field the source contract requires.
    #[error("{context} response is missing `{field}`")]
    MissingField {
        context: String,
        field: &'static str,
    },

    /// The envelope reported `success: false`, or omitted the flag where it
    /// is required.
    #[error("{context} reported failure: {reason}")]
    Unsuccessful { context: String, reason: String },
}

/// Coarse failure taxonomy used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    HttpStatus,
    Application,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::HttpStatus => write!(f, "http_status"),
            FailureKind::Application => write!(f, "application"),
        }
    }
}

impl SourceError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            SourceError::Transport(_) => FailureKind::Transport,
            SourceError::HttpStatus { .. } => FailureKind::HttpStatus,
            SourceError::Deserialize { .. }
            | SourceError::MissingField { .. }
            | SourceError::Unsuccessful { .. } => FailureKind::Application,
        }
    }
}

/// Errors raised while constructing a [`crate::DashboardClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("session cookie is not a valid header value")]
    InvalidSessionCookie,
}

/// Errors from the local profile cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
