//! HTTP messages as plain data.
//!
//! # Design
//! `ParserClient` builds an `HttpRequest` and parses an `HttpResponse` without
//! touching the network; a `Transport` sits between the two and does the
//! actual I/O. Keeping the messages as owned data lets the build and parse
//! halves be tested with hand-written responses.
//!
//! The parser server exposes a single POST endpoint, so the method is not
//! modelled. Response bodies stay as raw bytes: whether they decode is for
//! the client to judge, not the transport.

/// A POST request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
