//! Error types for the parser client.
//!
//! # Design
//! Every failure branch of a parse call is one variant, so callers can match
//! on the kind of failure instead of inspecting messages. Only `Decode` is
//! produced after retrying; `Connectivity` and `Http` are returned as soon as
//! they are seen.

use std::fmt;

use crate::transport::{TransportError, TransportErrorKind};

/// Why the parser server could not be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityKind {
    /// The request timed out.
    Timeout,
    /// The connection was refused, reset, or the host could not be resolved.
    Connection,
    /// Any other transport failure.
    Other,
}

impl From<TransportErrorKind> for ConnectivityKind {
    fn from(kind: TransportErrorKind) -> Self {
        match kind {
            TransportErrorKind::Timeout => ConnectivityKind::Timeout,
            TransportErrorKind::Connection => ConnectivityKind::Connection,
            TransportErrorKind::Other => ConnectivityKind::Other,
        }
    }
}

impl fmt::Display for ConnectivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivityKind::Timeout => {
                write!(f, "timed out, the parser server is most likely not running")
            }
            ConnectivityKind::Connection => {
                write!(f, "connection error, the parser server is most likely not running")
            }
            ConnectivityKind::Other => write!(f, "cannot connect to the parser server"),
        }
    }
}

/// Errors returned by `ParserClient`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server could not be reached. Never retried.
    #[error("{kind} at {host}:{port}")]
    Connectivity {
        kind: ConnectivityKind,
        host: String,
        port: u16,
        #[source]
        source: TransportError,
    },

    /// The server answered with a non-2xx status, usually because the
    /// request body had the wrong shape. Never retried.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded, even after retrying.
    #[error("JSON decoding failed after {attempts} attempt(s), cannot parse this:\n{raw}")]
    Decode {
        attempts: u32,
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub(crate) fn connectivity(source: TransportError, host: &str, port: u16) -> Self {
        ClientError::Connectivity {
            kind: source.kind.into(),
            host: host.to_string(),
            port,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
