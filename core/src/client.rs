//! Blocking client for the TweeboParser HTTP server.
//!
//! # Design
//! A parse call is split the same way the transport boundary is:
//! `build_parse_request` produces an `HttpRequest`, a `Transport` executes it,
//! and `parse_response` interprets the `HttpResponse`. The public
//! `parse_as_*` methods drive that cycle and add the retry policy:
//!
//! - transport failures become `ClientError::Connectivity` immediately;
//! - non-2xx statuses become `ClientError::Http` immediately;
//! - a 2xx body that is not valid JSON for the expected shape re-issues the
//!   whole request, at most `max_decode_retries` times.
//!
//! The client holds no mutable state, so one instance can be shared across
//! threads.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::log::{LogSink, TracingSink};
use crate::transport::{Transport, UreqTransport};
use crate::types::{OutputType, ParseRequest, ParsedSentence};

pub struct ParserClient<T = UreqTransport> {
    config: ClientConfig,
    url: String,
    transport: T,
    sink: Arc<dyn LogSink>,
}

impl ParserClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl Default for ParserClient<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> ParserClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            url: config.base_url(),
            config,
            transport,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the sink that receives undecodable bodies when
    /// `log_on_failure` is set.
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Parse each text and return its tab-separated table, in input order.
    /// Blank texts come back as empty strings.
    pub fn parse_as_table<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<String>> {
        let texts: Vec<&str> = texts.iter().map(AsRef::as_ref).collect();
        let request = self.build_parse_request(&texts, OutputType::Table)?;
        self.execute(&request)
    }

    /// Parse each text and return its dependency tree, in input order.
    pub fn parse_as_tree<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<ParsedSentence>> {
        let texts: Vec<&str> = texts.iter().map(AsRef::as_ref).collect();
        let request = self.build_parse_request(&texts, OutputType::Tree)?;
        self.execute(&request)
    }

    /// Like `parse_as_table`/`parse_as_tree`, but `texts` is sent as given
    /// and the result is returned as untyped JSON. The server answers with
    /// `ClientError::Http` when `texts` is not an array of strings.
    pub fn parse_value(
        &self,
        texts: &serde_json::Value,
        output: OutputType,
    ) -> Result<serde_json::Value> {
        let request = self.build_parse_request(texts, output)?;
        self.execute(&request)
    }

    pub fn build_parse_request<B>(&self, texts: &B, output: OutputType) -> Result<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let payload = ParseRequest {
            texts,
            output_type: output,
        };
        let body = serde_json::to_string(&payload).map_err(ClientError::Serialization)?;
        Ok(HttpRequest {
            url: self.url.clone(),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("connection".to_string(), "close".to_string()),
            ],
            body,
        })
    }

    /// Interpret a single response without retrying.
    pub fn parse_response<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R> {
        check_status(&response)?;
        serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
            attempts: 1,
            raw: response.text(),
            source,
        })
    }

    fn execute<R: DeserializeOwned>(&self, request: &HttpRequest) -> Result<R> {
        let max_retries = self.config.max_decode_retries;
        let mut retries = 0;
        loop {
            debug!(url = %request.url, attempt = retries + 1, "sending parse request");
            let response = self
                .transport
                .execute(request)
                .map_err(|e| ClientError::connectivity(e, &self.config.host, self.config.port))?;
            check_status(&response)?;

            match serde_json::from_slice(&response.body) {
                Ok(decoded) => return Ok(decoded),
                Err(source) if retries < max_retries => {
                    retries += 1;
                    warn!(retries, max_retries, error = %source, "undecodable parser response, retrying");
                }
                Err(source) => {
                    let raw = response.text();
                    if self.config.log_on_failure {
                        self.log_failure(&raw);
                    }
                    return Err(ClientError::Decode {
                        attempts: retries + 1,
                        raw,
                        source,
                    });
                }
            }
        }
    }

    fn log_failure(&self, raw: &str) {
        if let Err(e) = self.sink.write_line(raw) {
            warn!(error = %e, "failed to write undecodable response to log sink");
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ParserClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserClient")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

/// Map non-2xx status codes to `ClientError::Http`.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ClientError::Http {
        status: response.status,
        body: response.text(),
    })
}
