//! Error types for Shelf exchanges.
//!
//! [`ShelfError`] is the single error returned to callers of every Shelf
//! operation. Each variant names one failure category; the structured HTTP
//! variant is produced by [`crate::classify`], the others by request building,
//! the transport and the codec.
//!
//! [`TransportError`] is the port-level error returned by
//! [`crate::Transport`] implementations. It is wrapped by
//! [`ShelfError::Transport`] and never classified: there is no HTTP response
//! behind it.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Transport failures
// ---------------------------------------------------------------------------

/// Failures raised by a [`crate::Transport`] before an HTTP response exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection to the server could not be established or was lost.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The transport's deadline elapsed before a response arrived.
    #[error("Request timed out")]
    Timeout,

    /// The transport could not build the request, e.g. a bad header value.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any other transport failure, including errors reading the response body.
    #[error("Transport error: {0}")]
    Other(String),
}

// ---------------------------------------------------------------------------
// Shelf errors
// ---------------------------------------------------------------------------

/// The classified failure of one Shelf exchange.
///
/// Created once per failing call and returned to the caller unchanged. The
/// library never retries; [`ShelfError::is_transient`] only labels the error
/// so callers can apply their own policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShelfError {
    /// The transport failed before any response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The base path could not be turned into a request URI.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The path as supplied by the caller.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// The server answered with a status outside `[200, 400)`.
    ///
    /// `code` and `message` come from the JSON error body when it has both
    /// fields, otherwise from the status-code fallback table.
    #[error("{message}")]
    Http {
        /// HTTP status code of the response.
        status: u16,
        /// Machine-readable error category (e.g. `"permission_denied"`).
        code: String,
        /// Human-readable description.
        message: String,
    },

    /// A request payload could not be serialised or read.
    #[error("Encoding error: {message}")]
    Encoding {
        /// Description of the failure.
        message: String,
    },

    /// A response payload did not have the expected shape.
    #[error("Decoding error: {message}")]
    Decoding {
        /// Description of the failure, naming the offending key when known.
        message: String,
    },
}

impl ShelfError {
    /// Creates an [`ShelfError::InvalidPath`].
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`ShelfError::Encoding`].
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Creates a [`ShelfError::Decoding`].
    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding {
            message: message.into(),
        }
    }

    /// Returns the machine-readable error category.
    ///
    /// For [`ShelfError::Http`] this is the server-supplied (or fallback) code;
    /// every other variant has a fixed code.
    pub fn code(&self) -> &str {
        match self {
            Self::Transport(_) => "transport_error",
            Self::InvalidPath { .. } => "invalid_path",
            Self::Http { code, .. } => code,
            Self::Encoding { .. } => "encoding_error",
            Self::Decoding { .. } => "decoding_error",
        }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns the HTTP status for classified failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for failures that may succeed if the call is repeated:
    /// transport failures and HTTP 503/504.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http { status, .. } => matches!(status, 503 | 504),
            _ => false,
        }
    }
}
