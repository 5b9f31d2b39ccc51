//! Intake: the upload boundary: allow-list, classify, archive.
//!
//! Every upload in a batch is resolved on its own. A rejected or failed file
//! is reported and the batch moves on.

use std::fmt;

use serde::Serialize;

use crate::archive::{sanitize_extension, Archive};
use crate::classify::Classifier;
use crate::config::IntakeConfig;
use crate::types::{LogType, RawUpload};

/// Why an upload was not archived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// Missing filename or an extension outside the allow-list.
    DisallowedFormat,
    TooLarge { size: u64, limit: u64 },
    /// Content matched no known log format.
    Unrecognized,
    /// The archive write failed.
    Storage { message: String },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::DisallowedFormat => write!(f, "invalid file type"),
            RejectReason::TooLarge { size, limit } => {
                write!(f, "file too large ({size} bytes, limit {limit})")
            }
            RejectReason::Unrecognized => write!(f, "unrecognized log type"),
            RejectReason::Storage { message } => write!(f, "storage failure: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IngestOutcome {
    Stored { log_type: LogType, name: String },
    Rejected(RejectReason),
}

/// Per-file result of [`Intake::ingest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Filename as supplied by the client.
    pub filename: String,
    #[serde(flatten)]
    pub outcome: IngestOutcome,
}

impl IngestReport {
    pub fn is_stored(&self) -> bool {
        matches!(self.outcome, IngestOutcome::Stored { .. })
    }

    /// One-line message suitable for showing to the uploader.
    pub fn summary(&self) -> String {
        match &self.outcome {
            IngestOutcome::Stored { log_type, name } => {
                format!("stored {} as {log_type} ({name})", self.filename)
            }
            IngestOutcome::Rejected(reason) => format!("rejected {}: {reason}", self.filename),
        }
    }
}

/// Runs the classify-then-archive pipeline over uploaded files.
#[derive(Debug, Clone)]
pub struct Intake {
    classifier: Classifier,
    archive: Archive,
    allowed_extensions: Vec<String>,
    max_file_bytes: u64,
}

impl Intake {
    pub fn new(config: &IntakeConfig, classifier: Classifier, archive: Archive) -> Self {
        Self {
            classifier,
            archive,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_file_bytes: config.max_file_bytes,
        }
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// `true` when `filename` has an extension on the allow-list.
    ///
    /// The extension is the one the archive would keep, so dotfiles and
    /// directory components never pass on a misleading suffix.
    pub fn is_allowed(&self, filename: &str) -> bool {
        let ext = sanitize_extension(filename);
        let ext = ext.trim_start_matches('.');
        !ext.is_empty() && self.allowed_extensions.iter().any(|a| a == ext)
    }

    /// Process a batch. Reports come back in upload order.
    pub fn ingest<I>(&self, uploads: I) -> Vec<IngestReport>
    where
        I: IntoIterator<Item = RawUpload>,
    {
        uploads.into_iter().map(|u| self.ingest_one(&u)).collect()
    }

    /// Process one upload.
    pub fn ingest_one(&self, upload: &RawUpload) -> IngestReport {
        match self.resolve(upload) {
            Ok((log_type, name)) => IngestReport {
                filename: upload.filename.clone(),
                outcome: IngestOutcome::Stored { log_type, name },
            },
            Err(reason) => self.reject(&upload.filename, reason),
        }
    }

    /// The checks that need only the filename and the size, in the order
    /// [`Intake::ingest_one`] applies them. Lets a caller turn away a file
    /// before reading its content.
    pub fn screen(&self, filename: &str, size: u64) -> Result<(), RejectReason> {
        if filename.trim().is_empty() || !self.is_allowed(filename) {
            return Err(RejectReason::DisallowedFormat);
        }
        if size > self.max_file_bytes {
            return Err(RejectReason::TooLarge { size, limit: self.max_file_bytes });
        }
        Ok(())
    }

    /// Report `filename` as rejected without looking at its content.
    pub fn reject(&self, filename: &str, reason: RejectReason) -> IngestReport {
        tracing::warn!(file = %filename, %reason, "upload rejected");
        IngestReport {
            filename: filename.to_string(),
            outcome: IngestOutcome::Rejected(reason),
        }
    }

    fn resolve(&self, upload: &RawUpload) -> Result<(LogType, String), RejectReason> {
        self.screen(&upload.filename, upload.content.len() as u64)?;

        let log_type = self
            .classifier
            .classify(&upload.content)
            .ok_or(RejectReason::Unrecognized)?;

        let stored = self
            .archive
            .store(log_type, &upload.filename, &upload.content)
            .map_err(|e| RejectReason::Storage { message: e.to_string() })?;
        Ok((log_type, stored.name))
    }
}
