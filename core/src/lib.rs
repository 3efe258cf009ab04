//! Blocking HTTP client for a TweeboParser dependency-parsing server.
//!
//! # Overview
//! `ParserClient` sends a list of texts to the server and returns either a
//! tab-separated table per text (`parse_as_table`) or a structured dependency
//! tree per text (`parse_as_tree`). Results come back in input order and are
//! passed through unchanged.
//!
//! # Design
//! - Request building and response parsing are pure; a `Transport` performs
//!   the round-trip, so retries and failures can be tested without a server.
//! - `ClientError` tags each failure kind: connectivity, HTTP status, decode.
//!   Only decode failures are retried, in a bounded loop.
//! - Undecodable bodies go to an injected `LogSink` when `log_on_failure` is
//!   set; nothing is written to the filesystem unless a `FileSink` is given.
//! - Wire types are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod log;
pub mod transport;
pub mod types;

pub use client::ParserClient;
pub use config::ClientConfig;
pub use error::{ClientError, ConnectivityKind, Result};
pub use http::{HttpRequest, HttpResponse};
pub use log::{FileSink, LogSink, MemorySink, TracingSink};
pub use transport::{Transport, TransportError, TransportErrorKind, UreqTransport};
pub use types::{Dependency, OutputType, ParsedSentence, TableRow, Token};
