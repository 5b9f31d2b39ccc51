//! Test builders: an archive rooted in a temp directory, wired the same way
//! the binary wires it.
//!
//! These are designed for readability in tests, not for production use.
//! They panic on setup failure rather than returning `Result`.

use logvault_core::config::{Config, FileAccess};
use logvault_core::{Archive, Classifier, History, Intake, LogType, RawUpload};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// TestArchive
// ---------------------------------------------------------------------------

/// A [`Config`] whose archive root is a fresh temp directory, removed on drop.
///
/// # Example
///
/// ```rust
/// let fx = TestArchive::new();
/// let stored = fx.archive().store(LogType::System, "m.txt", b"cpu_usage 1").unwrap();
/// assert!(fx.type_dir(LogType::System).join(&stored.name).exists());
/// ```
pub struct TestArchive {
    dir: tempfile::TempDir,
    config: Config,
}

impl TestArchive {
    pub fn new() -> Self {
        Self::with_access(FileAccess::Inherit)
    }

    pub fn with_access(file_access: FileAccess) -> Self {
        let dir = tempfile::tempdir().expect("create temp archive root");
        let mut config = Config::defaults();
        config.archive.root = dir.path().join("uploads");
        config.archive.file_access = file_access;
        Self { dir, config }
    }

    pub fn max_file_bytes(mut self, limit: u64) -> Self {
        self.config.intake.max_file_bytes = limit;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.config.archive.root
    }

    /// The temp directory that contains the archive root.
    pub fn scratch(&self) -> &Path {
        self.dir.path()
    }

    pub fn type_dir(&self, log_type: LogType) -> PathBuf {
        self.root().join(log_type.as_str())
    }

    pub fn archive(&self) -> Archive {
        Archive::new(&self.config.archive)
    }

    pub fn history(&self) -> History {
        History::new(&self.config.archive)
    }

    pub fn intake(&self) -> Intake {
        Intake::new(&self.config.intake, Classifier::new(), self.archive())
    }

    /// Names currently in `log_type`'s directory, sorted.
    pub fn files_in(&self, log_type: LogType) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(self.type_dir(log_type)) {
            Ok(rd) => rd
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Drop a file into a type directory directly, bypassing the archive.
    pub fn place(&self, log_type: LogType, name: &str, content: &[u8]) {
        let dir = self.type_dir(log_type);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), content).unwrap();
    }
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

pub fn upload(filename: &str, content: impl Into<bytes::Bytes>) -> RawUpload {
    RawUpload::new(filename, content)
}
