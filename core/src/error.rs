//! Error types for the Crowdin client.
//!
//! # Design
//! Callers need to tell apart four failure classes: the transport failed,
//! the server rejected the call, the server's success response did not
//! parse, and local file I/O failed. Each gets its own variant. Nothing is
//! retried and nothing is swallowed.

use std::io;
use std::path::PathBuf;

use serde::Deserialize;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CrowdinError>;

/// Boxed cause carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised by a `Transport` while executing a request.
///
/// Every variant keeps the underlying error as its `source()`.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connect or whole-call timeout elapsed, possibly while a body was
    /// still streaming.
    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),

    /// Connection, DNS, TLS or protocol failure.
    #[error("connection error: {0}")]
    Connection(#[source] BoxError),

    /// A request or response body stream failed part-way.
    #[error("body stream failed: {0}")]
    Body(#[source] io::Error),
}

impl TransportError {
    /// Classify an error raised while streaming a body. Transports report
    /// elapsed timeouts as `io::ErrorKind::TimedOut`.
    pub fn body(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::TimedOut {
            TransportError::Timeout(Box::new(err))
        } else {
            TransportError::Body(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

/// Errors returned by `CrowdinClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum CrowdinError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a status other than 200.
    #[error("Status code: {status}")]
    Status { status: u16, body: String },

    /// A 200 response whose body is not the expected JSON shape.
    #[error("failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Reading an upload or writing a download failed.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required option was empty.
    #[error("{0} can't be empty")]
    MissingOption(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CrowdinError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        CrowdinError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// HTTP status of a rejected call, `None` for every other failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            CrowdinError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body of a rejected or undecodable response.
    pub fn body(&self) -> Option<&str> {
        match self {
            CrowdinError::Status { body, .. } | CrowdinError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The error envelope Crowdin sends with rejected calls, if the body
    /// carries one.
    pub fn remote_error(&self) -> Option<RemoteError> {
        let CrowdinError::Status { body, .. } = self else {
            return None;
        };
        serde_json::from_str::<RemoteErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error)
    }
}

/// Error details reported by the Crowdin API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteError {
    #[serde(default, deserialize_with = "crate::lenient::u64_value")]
    pub code: u64,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
struct RemoteErrorEnvelope {
    error: RemoteError,
}
