//! Error types for the SportsWorldCentral client

use thiserror::Error;

use crate::swc::bulk::BulkFileFormat;


pub type Result<T> = std::result::Result<T, SwcError>;

/// What went wrong at the network layer, before any status code was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The per-request timeout expired
    Timeout,
    /// DNS resolution or TCP/TLS connect failed
    Connect,
    /// Anything else the HTTP stack reported (reset mid-body, bad redirect, ...)
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::Connect => write!(f, "connection failed"),
            TransportErrorKind::Other => write!(f, "network error"),
        }
    }
}

/// Whether the retry policy may re-attempt an operation that failed with a given error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retryability {
    Retryable,
    NonRetryable,
}

#[derive(Error, Debug)]
pub enum SwcError {
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Transport error ({kind}): {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    #[error("API returned status {status}: {body_snippet}")]
    ApiStatus { status: u16, body_snippet: String },

    #[error("Malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Schema mismatch in {record} at `{field}`: {reason}")]
    SchemaMismatch {
        record: &'static str,
        field: String,
        reason: String,
    },

    #[error("Gave up after {attempts} attempts: {last}")]
    RetryExhausted { attempts: u32, last: Box<SwcError> },

    #[error("Unexpected {format} bulk file content: {reason}")]
    BulkContent {
        format: BulkFileFormat,
        reason: String,
    },

    #[error("Invalid {kind} id: {value:?}")]
    InvalidId { kind: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SwcError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        SwcError::Configuration {
            message: message.into(),
        }
    }

    /// Classify this error for the retry policy.
    ///
    /// Only network failures and 500/502/503/504 responses are worth another attempt;
    /// a 4xx or a body that does not decode will fail the same way every time.
    pub fn classification(&self) -> Retryability {
        match self {
            SwcError::Transport { .. } => Retryability::Retryable,
            SwcError::ApiStatus { status, .. } if matches!(status, 500 | 502 | 503 | 504) => {
                Retryability::Retryable
            }
            _ => Retryability::NonRetryable,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.classification() == Retryability::Retryable
    }

    /// HTTP status carried by this error, looking through `RetryExhausted`.
    pub fn status(&self) -> Option<u16> {
        match self {
            SwcError::ApiStatus { status, .. } => Some(*status),
            SwcError::RetryExhausted { last, .. } => last.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SwcError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        SwcError::Transport {
            kind,
            message: err.to_string(),
        }
    }
}
