//! Configuration types for logvault.
//!
//! [`Config::load`] layers, lowest to highest priority: the embedded
//! defaults, `~/.config/logvault/config.toml` (or an explicit path), and
//! `LOGVAULT_*` environment variables. [`Config::defaults`] returns the
//! embedded defaults without touching the filesystem or the environment
//! (useful in tests).
//!
//! The resulting value is built once at startup and handed by reference to
//! each component constructor.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[archive]
root        = "uploads"
file_access = "inherit"

[intake]
allowed_extensions = ["txt", "csv", "json", "log"]
max_file_bytes     = 16777216

[search]
endpoint = "http://localhost:9200"
"#;

const ENV_PREFIX: &str = "LOGVAULT";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// `[archive]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Directory holding one subdirectory per log type.
    #[serde(default = "default_archive_root")]
    pub root: PathBuf,
    #[serde(default)]
    pub file_access: FileAccess,
}

/// Permission policy applied to every archived file after it is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAccess {
    /// Leave the mode a new file gets under the process umask untouched
    /// (`0o666 & !umask`, typically `0o644`).
    #[default]
    Inherit,
    /// World read/write (`0o666`).
    Permissive,
    /// Owner read/write only (`0o600`).
    OwnerOnly,
}

impl FileAccess {
    /// Unix mode bits to apply, if any.
    pub fn mode(self) -> Option<u32> {
        match self {
            FileAccess::Inherit => None,
            FileAccess::Permissive => Some(0o666),
            FileAccess::OwnerOnly => Some(0o600),
        }
    }
}

/// `[intake]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Lowercase extensions (without the dot) accepted for upload.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the full-text index, e.g. `http://localhost:9200`.
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
}

fn default_archive_root() -> PathBuf { PathBuf::from("uploads") }
fn default_allowed_extensions() -> Vec<String> {
    ["txt", "csv", "json", "log"].iter().map(|s| s.to_string()).collect()
}
fn default_max_file_bytes() -> u64 { 16 * 1024 * 1024 }
fn default_search_endpoint() -> String { "http://localhost:9200".to_string() }

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root: default_archive_root(),
            file_access: FileAccess::default(),
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { endpoint: default_search_endpoint() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// An explicit `path` must exist; the per-user default file is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::from(config_path().as_path()).required(false),
        };
        Self::build(Some(file), env_source(None))
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn build(
        file: Option<config::File<config::FileSourceFile, config::FileFormat>>,
        env: config::Environment,
    ) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        builder
            .add_source(env)
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn env_source(vars: Option<config::Map<String, String>>) -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("intake.allowed_extensions")
        .try_parsing(true)
        .source(vars)
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("logvault")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
