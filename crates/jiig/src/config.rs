//! Configuration management for jiig.
//!
//! Settings live in an optional `jiig.yaml`:
//!
//! ```yaml
//! data-file: exports/dag.jsonl
//! filter-mode: connected_only
//! layout: cose
//! cache-ttl-secs: 60
//! ```
//!
//! The file is located from `--config`, then `JIIG_CONFIG`, then
//! `./jiig.yaml`; without any of them the defaults apply. `JIIG_DATA_FILE`
//! overrides `data-file`.
//!
//! `cache-ttl-secs` bounds how long one [`crate::app::App`] reuses a fetched
//! table. The `jiig` binary fetches once per command, so it only matters to
//! callers that keep an `App` alive across runs.

use crate::error::{Error, Result};
use crate::pipeline::{FilterMode, Layout};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "jiig.yaml";

/// Default location of the record export
pub const DEFAULT_DATA_FILE: &str = "dag.jsonl";

/// Default lifetime of a cached record table
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "JIIG_CONFIG";

/// Environment variable overriding the data file
pub const DATA_FILE_ENV: &str = "JIIG_DATA_FILE";

/// Configuration file structure for jiig
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct JiigConfig {
    /// Path to the JSONL export
    pub data_file: PathBuf,

    /// Initial filter view; unknown names mean "all"
    #[serde(deserialize_with = "lenient_filter_mode")]
    pub filter_mode: FilterMode,

    /// Graph layout
    #[serde(deserialize_with = "strict_layout")]
    pub layout: Layout,

    /// Seconds a fetched table is reused by a long-lived [`crate::app::App`]
    pub cache_ttl_secs: u64,
}

fn lenient_filter_mode<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<FilterMode, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(FilterMode::parse_lenient(&name))
}

fn strict_layout<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Layout, D::Error> {
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl Default for JiigConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            filter_mode: FilterMode::default(),
            layout: Layout::default(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl JiigConfig {
    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed YAML, unknown keys or an
    /// unknown layout name.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file is a valid, all-defaults configuration.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml(&content)
    }

    /// Locate and load the configuration for a working directory.
    ///
    /// `explicit` is the `--config` flag. `env` looks up environment
    /// variables; the binary passes `std::env::var(..).ok()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an explicitly named file is missing or
    /// any file found is invalid.
    pub async fn resolve<F>(base_dir: &Path, explicit: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from));

        let mut config = match named {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                Self::load(&base_dir.join(path)).await?
            }
            None => {
                let local = base_dir.join(CONFIG_FILE_NAME);
                if fs::try_exists(&local).await.unwrap_or(false) {
                    tracing::debug!(path = %local.display(), "Loading configuration");
                    Self::load(&local).await?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(data_file) = env(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            config.data_file = PathBuf::from(data_file);
        }
        Ok(config)
    }

    /// Replace the data file, as the `--data` flag does.
    #[must_use]
    pub fn with_data_file(mut self, data_file: impl Into<PathBuf>) -> Self {
        self.data_file = data_file.into();
        self
    }

    /// Cache lifetime as a [`Duration`].
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
