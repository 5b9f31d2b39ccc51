//! Fake full-text index API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `POST /{index}/_search`, recording every request and
//! answering with the configured hits or a configured failure status.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeIndexApi::start().await.unwrap();
//! api.set_hits(vec![serde_json::json!({ "_id": "1" })]).await;
//!
//! // Point the backend at api.base_url()
//! let url = api.base_url();
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as seen by the fake server.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSearch {
    /// Index expression from the path, e.g. `nginx-*`.
    pub index: String,
    pub body: serde_json::Value,
}

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    hits: Vec<serde_json::Value>,
    /// When set, every search answers with this status and an error body.
    failure: Option<StatusCode>,
    requests: Vec<RecordedSearch>,
}

/// Handle to the running fake index server.
pub struct FakeIndexApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeIndexApi {
    /// Start the fake server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/{index}/_search", post(search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Hits returned by every subsequent search.
    pub async fn set_hits(&self, hits: Vec<serde_json::Value>) {
        self.state.lock().await.hits = hits;
    }

    /// Make every subsequent search fail with `status`.
    pub async fn fail_with(&self, status: StatusCode) {
        self.state.lock().await.failure = Some(status);
    }

    /// Every search received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedSearch> {
        self.state.lock().await.requests.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn search(
    Path(index): Path<String>,
    State(state): State<Arc<Mutex<ApiState>>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.requests.push(RecordedSearch { index, body });

    if let Some(status) = state.failure {
        let error = serde_json::json!({
            "error": { "type": "search_phase_execution_exception", "reason": "all shards failed" },
            "status": status.as_u16(),
        });
        return (status, Json(error));
    }

    let response = serde_json::json!({
        "took": 1,
        "timed_out": false,
        "hits": {
            "total": { "value": state.hits.len(), "relation": "eq" },
            "max_score": 1.0,
            "hits": state.hits,
        }
    });
    (StatusCode::OK, Json(response))
}
