//! Elasticsearch-compatible `_search` adapter over plain HTTP.
//!
//! Issues `POST {endpoint}/{prefix}*/_search` with a `query_string` query and
//! returns `hits.hits` untouched. There is no retry and no timeout beyond
//! the client defaults. Only `http://` endpoints are supported.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::Deserialize;

use logvault_core::config::SearchConfig;
use logvault_core::{BackendError, SearchBackend};

/// Pooled HTTP client for one index endpoint. Wrap in an `Arc` to share it
/// between gateways.
pub struct ElasticsearchBackend {
    client: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
}

impl ElasticsearchBackend {
    /// Must be called from within a tokio runtime.
    pub fn new(config: &SearchConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_uri(&self, index_prefix: &str) -> String {
        format!("{}/{index_prefix}*/_search", self.base_url)
    }
}

/// Body of a free-text query; the text is passed through verbatim.
fn query_body(query_text: &str) -> serde_json::Value {
    serde_json::json!({
        "query": {
            "query_string": { "query": query_text }
        }
    })
}

// ---------------------------------------------------------------------------
// Elasticsearch response types (internal)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Deserialize)]
struct SearchHits {
    hits: Vec<serde_json::Value>,
}

fn decode_hits(body: &[u8]) -> Result<Vec<serde_json::Value>, BackendError> {
    serde_json::from_slice::<SearchResponse>(body)
        .map(|resp| resp.hits.hits)
        .map_err(|e| BackendError::Decode(e.to_string()))
}

// ---------------------------------------------------------------------------
// SearchBackend implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    async fn search(
        &self,
        index_prefix: &str,
        query_text: &str,
    ) -> Result<Vec<serde_json::Value>, BackendError> {
        let uri = self.search_uri(index_prefix);
        let body = serde_json::to_vec(&query_body(query_text))
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        let req = Request::builder()
            .method(Method::POST)
            .uri(uri.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let resp = self
            .client
            .request(req)
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?
            .to_bytes();

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let hits = decode_hits(&bytes)?;
        tracing::debug!(uri = %uri, hits = hits.len(), "index search returned");
        Ok(hits)
    }
}
