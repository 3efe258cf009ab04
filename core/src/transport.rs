//! The I/O seam between `ParserClient` and the network.
//!
//! `UreqTransport` is the default: a blocking `ureq` agent with status codes
//! returned as data, so 4xx/5xx responses reach the client's own status
//! handling instead of surfacing as transport errors.

use std::io;
use std::sync::Arc;

use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connection,
    Other,
}

/// A failure below the HTTP layer: nothing usable came back from the server.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        let kind = match &err {
            ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
            ureq::Error::Io(e) if e.kind() == io::ErrorKind::TimedOut => TransportErrorKind::Timeout,
            ureq::Error::Io(_) | ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
                TransportErrorKind::Connection
            }
            _ => TransportErrorKind::Other,
        };
        Self::new(kind, err.to_string())
    }
}

/// Blocking transport backed by a shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder.send(request.body.as_bytes())?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // ureq caps body reads at 10 MiB by default; large batches go past it.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
