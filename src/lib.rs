//! logvault: archive uploaded log files by detected type, list them, and
//! search them through an external full-text index.
//!
//! The pipeline lives in [`logvault_core`]; the index adapter in
//! [`logvault_index`]. This crate adds the [`commands`] layer the `logvault`
//! binary dispatches to, kept in the library so integration harnesses can
//! drive it without spawning a process.
//!
//! # Architecture
//!
//! ```text
//! ingest ──► Intake ──► Classifier ──► Archive
//! history ─────────────────────────► History
//! search ──► SearchGateway ──► ElasticsearchBackend
//! ```

pub mod commands;

pub use logvault_core::{
    archive, classify, config, history, intake, search, types, Archive, ArchiveEntry,
    ArchiveTimestamp, Classifier, Config, History, HistoryListing, IngestOutcome, IngestReport,
    Intake, LogType, RawUpload, RejectReason, SearchBackend, SearchError, SearchGateway,
    SearchResults,
};
pub use logvault_index::ElasticsearchBackend;
