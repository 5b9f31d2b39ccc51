//! History index: a read-only, per-type view of what has been archived.
//!
//! Nothing is cached: every call re-reads the type directories. Each entry's
//! timestamp comes from the `YYYYMMDD-HHMMSS` segment of its filename.
//!
//! Ordering is newest-first by the *display label*, compared as strings.
//! Because the fallback label is `"Unknown date"` and `'U'` sorts above any
//! digit, entries without a parsable timestamp appear before all dated
//! entries. Ties are broken by filename, ascending.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use regex::Regex;

use crate::config::ArchiveConfig;
use crate::error::ArchiveError;
use crate::types::{ArchiveEntry, ArchiveTimestamp, LogType};

const STAMP_PATTERN: &str = r"(\d{8})-(\d{6})";

/// Listing of the archive, keyed by type. Every [`LogType`] has a key, even
/// when its directory is empty or missing.
pub type HistoryListing = BTreeMap<LogType, Vec<ArchiveEntry>>;

#[derive(Debug, Clone)]
pub struct History {
    root: PathBuf,
    stamp: Regex,
}

impl History {
    pub fn new(config: &ArchiveConfig) -> Self {
        Self {
            root: config.root.clone(),
            stamp: Regex::new(STAMP_PATTERN).expect("built-in timestamp pattern must compile"),
        }
    }

    /// Enumerate every type directory and return newest-first listings.
    pub fn list_by_type(&self) -> Result<HistoryListing, ArchiveError> {
        let mut listing = HistoryListing::new();
        for log_type in LogType::ALL {
            let entries = self.list(log_type)?;
            listing.insert(log_type, entries);
        }
        Ok(listing)
    }

    /// Newest-first entries for a single type.
    pub fn list(&self, log_type: LogType) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let dir = self.root.join(log_type.as_str());
        let mut entries = self.read_entries(&dir)?;
        entries.sort_by_cached_key(|e| (Reverse(e.timestamp.label()), e.name.clone()));
        tracing::debug!(log_type = %log_type, entries = entries.len(), "listed archive");
        Ok(entries)
    }

    fn read_entries(&self, dir: &Path) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let read_dir = match std::fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ArchiveError::ReadDir { path: dir.to_path_buf(), source })
            }
        };

        let mut entries = Vec::new();
        for item in read_dir {
            let item = item.map_err(|source| ArchiveError::ReadDir { path: dir.to_path_buf(), source })?;
            // A file may be replaced or removed between readdir and stat.
            let Ok(meta) = item.metadata() else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            let name = item.file_name().to_string_lossy().into_owned();
            entries.push(ArchiveEntry {
                timestamp: self.parse_timestamp(&name),
                path: item.path(),
                size: meta.len(),
                name,
            });
        }
        Ok(entries)
    }

    /// Recover the storage time embedded in a canonical filename.
    pub fn parse_timestamp(&self, file_name: &str) -> ArchiveTimestamp {
        self.stamp
            .captures_iter(file_name)
            .find_map(|caps| {
                let stamp = format!("{}-{}", &caps[1], &caps[2]);
                NaiveDateTime::parse_from_str(&stamp, "%Y%m%d-%H%M%S").ok()
            })
            .map_or(ArchiveTimestamp::Unknown, ArchiveTimestamp::Parsed)
    }
}
