//! Error types for the archive, the search gateway and search backends.

use std::path::PathBuf;

/// Failures while writing to or reading from the archive directory tree.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to create archive directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The staged file could not be moved to its canonical name.
    #[error("failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to set permissions on {path}: {source}")]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read archive directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Search requests rejected before any backend call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search query must not be empty")]
    EmptyQuery,

    #[error("unknown log type: {0:?}")]
    UnknownLogType(String),
}

/// Errors reported by a [`SearchBackend`](crate::search::SearchBackend).
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("index responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("malformed index response: {0}")]
    Decode(String),
}
