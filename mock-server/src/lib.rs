//! Stand-in for the TweeboParser HTTP server.
//!
//! Serves `POST /` with `{"texts": [...], "output_type": "table" | "tree"}`
//! and answers with one rendering per text, in order. Bodies of the wrong
//! shape are rejected by the `Json` extractor with a 4xx status.
//!
//! `MockState` can make the first N responses malformed JSON with a 200
//! status, which is how the client's decode retries are exercised.

pub mod parser;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub use parser::{Dependency, Sentence, Token};

/// Body returned in place of a real response when a malformed one is due.
pub const MALFORMED_BODY: &str = "[\"1\\tRT\\t_";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Table,
    Tree,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseRequest {
    pub texts: Vec<String>,
    pub output_type: OutputType,
}

#[derive(Clone, Debug, Default)]
pub struct MockState {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    malformed_remaining: AtomicUsize,
    served: AtomicUsize,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the first `count` well-formed requests with `MALFORMED_BODY`.
    pub fn with_malformed_responses(count: usize) -> Self {
        let state = Self::default();
        state.inner.malformed_remaining.store(count, Ordering::SeqCst);
        state
    }

    /// Requests that got past body extraction.
    pub fn requests_served(&self) -> usize {
        self.inner.served.load(Ordering::SeqCst)
    }

    fn take_malformed(&self) -> bool {
        self.inner
            .malformed_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

pub fn app() -> Router {
    app_with_state(MockState::new())
}

pub fn app_with_state(state: MockState) -> Router {
    Router::new().route("/", post(parse)).with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, MockState::new()).await
}

pub async fn run_with_state(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn parse(State(state): State<MockState>, Json(input): Json<ParseRequest>) -> Response {
    state.inner.served.fetch_add(1, Ordering::SeqCst);
    tracing::debug!(texts = input.texts.len(), output = ?input.output_type, "parse request");

    if state.take_malformed() {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            MALFORMED_BODY,
        )
            .into_response();
    }

    match input.output_type {
        OutputType::Table => {
            let tables: Vec<String> = input.texts.iter().map(|t| parser::render_table(t)).collect();
            Json(tables).into_response()
        }
        OutputType::Tree => {
            let trees: Vec<Sentence> = input
                .texts
                .iter()
                .enumerate()
                .map(|(i, t)| parser::render_tree(i, t))
                .collect();
            Json(trees).into_response()
        }
    }
}
