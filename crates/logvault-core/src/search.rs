//! Search gateway: forwards free-text queries to an external full-text
//! index, scoped to one log type.
//!
//! The gateway validates input, scopes the query to indices named
//! `{log_type}-*`, and hands the query text to a [`SearchBackend`] verbatim.
//! Backend failures are logged and folded into an empty result carrying a
//! user-facing notice; they never reach the caller as an error.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{BackendError, SearchError};
use crate::types::LogType;

/// Capability to run one query-string search against an external index.
///
/// Implementations must be `Send + Sync` so one handle can be shared by
/// concurrent requests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Search every index whose name starts with `index_prefix`.
    ///
    /// Hits are returned in the backend's order, unmodified.
    async fn search(
        &self,
        index_prefix: &str,
        query_text: &str,
    ) -> Result<Vec<serde_json::Value>, BackendError>;
}

#[async_trait]
impl<B: SearchBackend + ?Sized> SearchBackend for Arc<B> {
    async fn search(
        &self,
        index_prefix: &str,
        query_text: &str,
    ) -> Result<Vec<serde_json::Value>, BackendError> {
        (**self).search(index_prefix, query_text).await
    }
}

/// Hits for display, plus a notice when the backend could not be reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub hits: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl SearchResults {
    pub fn is_degraded(&self) -> bool {
        self.notice.is_some()
    }
}

/// Validates and scopes queries before delegating to a backend.
pub struct SearchGateway<B> {
    backend: B,
}

impl<B: SearchBackend> SearchGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Index prefix searched for `log_type`.
    pub fn index_prefix(log_type: LogType) -> String {
        format!("{log_type}-")
    }

    /// Parse `log_type` and run [`SearchGateway::search_type`].
    pub async fn search(
        &self,
        log_type: &str,
        query_text: &str,
    ) -> Result<SearchResults, SearchError> {
        if query_text.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let log_type: LogType = log_type.parse()?;
        self.search_type(log_type, query_text).await
    }

    /// Run `query_text` against the `{log_type}-*` indices.
    ///
    /// Only an empty query is rejected; a backend failure yields empty hits
    /// with a notice.
    pub async fn search_type(
        &self,
        log_type: LogType,
        query_text: &str,
    ) -> Result<SearchResults, SearchError> {
        if query_text.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let prefix = Self::index_prefix(log_type);
        match self.backend.search(&prefix, query_text).await {
            Ok(hits) => {
                tracing::debug!(index = %prefix, hits = hits.len(), "search completed");
                Ok(SearchResults { hits, notice: None })
            }
            Err(e) => {
                tracing::error!(index = %prefix, error = %e, "search backend failed");
                Ok(SearchResults {
                    hits: Vec::new(),
                    notice: Some(format!("Search error: {e}")),
                })
            }
        }
    }
}
