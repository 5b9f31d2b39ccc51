//! Archive manager: persists accepted uploads under canonical names.
//!
//! Layout:
//!
//! ```text
//! <root>/
//!   mysql/   mysql-20240305-142207.log
//!   nginx/   nginx-20240305-142301.json
//!   system/  system-20240305-142355.txt
//!   .staging/   in-flight writes, renamed into place when complete
//! ```
//!
//! Canonical names have second granularity. Two uploads of the same type in
//! the same second resolve to the same name and the later rename replaces
//! the earlier file.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use crate::config::{ArchiveConfig, FileAccess};
use crate::error::ArchiveError;
use crate::types::LogType;

const STAGING_DIR: &str = ".staging";
const MAX_EXTENSION_LEN: usize = 16;

/// Result of a successful [`Archive::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub log_type: LogType,
    /// Canonical filename, e.g. `mysql-20240305-142207.log`.
    pub name: String,
    pub path: PathBuf,
}

/// Owner of the on-disk archive.
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
    file_access: FileAccess,
}

impl Archive {
    pub fn new(config: &ArchiveConfig) -> Self {
        Self {
            root: config.root.clone(),
            file_access: config.file_access,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every archived file of `log_type`.
    pub fn type_dir(&self, log_type: LogType) -> PathBuf {
        self.root.join(log_type.as_str())
    }

    fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_DIR)
    }

    /// Create the per-type directories and the staging area. Idempotent.
    pub fn ensure_layout(&self) -> Result<(), ArchiveError> {
        let dirs = LogType::ALL
            .iter()
            .map(|ty| self.type_dir(*ty))
            .chain(std::iter::once(self.staging_dir()));
        for dir in dirs {
            std::fs::create_dir_all(&dir)
                .map_err(|source| ArchiveError::CreateDir { path: dir.clone(), source })?;
        }
        Ok(())
    }

    /// Store `content` as a `log_type` file named from the current UTC time.
    pub fn store(
        &self,
        log_type: LogType,
        original_filename: &str,
        content: &[u8],
    ) -> Result<StoredFile, ArchiveError> {
        self.store_at(log_type, original_filename, content, Utc::now())
    }

    /// Store `content` with its canonical name computed from `at`.
    ///
    /// The bytes are written to a staging file first and renamed into the
    /// type directory, so readers never observe a partially written file.
    pub fn store_at(
        &self,
        log_type: LogType,
        original_filename: &str,
        content: &[u8],
        at: DateTime<Utc>,
    ) -> Result<StoredFile, ArchiveError> {
        self.ensure_layout()?;

        let name = canonical_name(log_type, original_filename, at);
        let dest = self.type_dir(log_type).join(&name);

        let staging = self.staging_dir();
        let mut staged = create_staged(&staging)
            .map_err(|source| ArchiveError::Write { path: staging.clone(), source })?;
        staged
            .write_all(content)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|source| ArchiveError::Write { path: staged.path().to_path_buf(), source })?;

        apply_file_access(staged.path(), self.file_access)?;

        staged
            .persist(&dest)
            .map_err(|e| ArchiveError::Persist { path: dest.clone(), source: e.error })?;

        tracing::info!(
            log_type = %log_type,
            file = %name,
            bytes = content.len(),
            "archived upload"
        );

        Ok(StoredFile { log_type, name, path: dest })
    }
}

/// Open a fresh staging file in `dir` with the mode a plain file create
/// would get, so [`FileAccess::Inherit`] leaves the umask result in place.
#[cfg(unix)]
fn create_staged(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // open(2) masks this with the process umask.
    tempfile::Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn create_staged(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

#[cfg(unix)]
fn apply_file_access(path: &Path, access: FileAccess) -> Result<(), ArchiveError> {
    use std::os::unix::fs::PermissionsExt;

    let Some(mode) = access.mode() else {
        return Ok(());
    };
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|source| ArchiveError::Permissions { path: path.to_path_buf(), source })
}

#[cfg(not(unix))]
fn apply_file_access(_path: &Path, _access: FileAccess) -> Result<(), ArchiveError> {
    Ok(())
}

/// `{type}-{YYYYMMDD}-{HHMMSS}{ext}` for an upload stored at `at`.
pub fn canonical_name(log_type: LogType, original_filename: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}-{}{}",
        log_type,
        at.format("%Y%m%d-%H%M%S"),
        sanitize_extension(original_filename)
    )
}

/// Extract a safe, lowercase extension (with its leading dot) from an
/// untrusted client filename. Returns an empty string when there is none.
///
/// Directory components are discarded and leading dots do not start an
/// extension, so `../../etc/.profile` yields `""`.
pub fn sanitize_extension(original_filename: &str) -> String {
    let base = original_filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches('.');

    match base.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => String::new(),
    }
}
