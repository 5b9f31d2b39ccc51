//! logvault-core: classification and archival pipeline.
//!
//! # Components
//!
//! ```text
//! RawUpload ──► Intake ──► Classifier ──► Archive ──► <root>/<type>/<canonical name>
//!                                                        │
//!                                           History ◄────┘
//!
//! (log_type, query) ──► SearchGateway ──► SearchBackend (external index)
//! ```
//!
//! Every component is constructed from the startup [`Config`] and holds no
//! shared mutable state, so all of them may be used from concurrent requests.

pub mod archive;
pub mod classify;
pub mod config;
pub mod error;
pub mod history;
pub mod intake;
pub mod search;
pub mod types;

pub use archive::{Archive, StoredFile};
pub use classify::Classifier;
pub use config::Config;
pub use error::{ArchiveError, BackendError, SearchError};
pub use history::{History, HistoryListing};
pub use intake::{IngestOutcome, IngestReport, Intake, RejectReason};
pub use search::{SearchBackend, SearchGateway, SearchResults};
pub use types::{ArchiveEntry, ArchiveTimestamp, LogType, RawUpload};
