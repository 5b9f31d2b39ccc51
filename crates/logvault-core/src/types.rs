//! Core types for logvault-core.
//!
//! This module defines the data shared across all components: the closed
//! [`LogType`] set, the transient [`RawUpload`] handed in by the upload
//! boundary, and the [`ArchiveEntry`] history view with its
//! [`ArchiveTimestamp`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::error::SearchError;

/// The known log formats. Adding a variant requires a detection rule in
/// [`Classifier`](crate::classify::Classifier) and gets its own archive
/// subdirectory automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    /// MySQL slow-query log.
    Mysql,
    /// Web-server access log, one JSON object per line.
    Nginx,
    /// `<metric> <value>` system metrics log.
    System,
}

impl LogType {
    /// Every storable type, in classification priority order.
    pub const ALL: [LogType; 3] = [LogType::Mysql, LogType::Nginx, LogType::System];

    /// Lowercase name used for directories, filenames and index prefixes.
    pub fn as_str(self) -> &'static str {
        match self {
            LogType::Mysql => "mysql",
            LogType::Nginx => "nginx",
            LogType::System => "system",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(LogType::Mysql),
            "nginx" => Ok(LogType::Nginx),
            "system" => Ok(LogType::System),
            _ => Err(SearchError::UnknownLogType(s.to_string())),
        }
    }
}

/// One uploaded file as received from the client.
///
/// `filename` is untrusted and may carry directory components or
/// path-unsafe characters; only its extension is ever used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUpload {
    pub filename: String,
    pub content: bytes::Bytes,
}

impl RawUpload {
    pub fn new(filename: impl Into<String>, content: impl Into<bytes::Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Display label for entries whose filename carries no parsable timestamp.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Timestamp recovered from an archived filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveTimestamp {
    Parsed(NaiveDateTime),
    Unknown,
}

impl ArchiveTimestamp {
    /// Display form: `YYYY-MM-DD HH:MM:SS`, or [`UNKNOWN_DATE`].
    ///
    /// History ordering compares these strings, not the dates.
    pub fn label(&self) -> String {
        match self {
            ArchiveTimestamp::Parsed(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            ArchiveTimestamp::Unknown => UNKNOWN_DATE.to_string(),
        }
    }

    pub fn parsed(&self) -> Option<NaiveDateTime> {
        match self {
            ArchiveTimestamp::Parsed(ts) => Some(*ts),
            ArchiveTimestamp::Unknown => None,
        }
    }
}

impl Serialize for ArchiveTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// One file found in the archive, as shown by the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    /// Filename inside the type directory.
    pub name: String,
    pub path: PathBuf,
    /// Size in bytes at listing time.
    pub size: u64,
    pub timestamp: ArchiveTimestamp,
}
