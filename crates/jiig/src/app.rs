//! Application context for CLI command execution.
//!
//! This module provides the `App` struct that resolves configuration, owns
//! the record source and runs the pipeline for CLI commands.
//!
//! The source built by [`App::from_directory`] is cached for the configured
//! `cache-ttl-secs`. A CLI command fetches once; an embedding service that
//! keeps one `App` and calls [`App::run`] repeatedly is served from the cache
//! until the entry expires.
//!
//! # Example
//!
//! ```no_run
//! use jiig::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new("."), None, None).await?;
//!     if let Some(output) = app.run(&app.pipeline_config()).await? {
//!         println!("{} failed", output.metrics.failed_entities);
//!     }
//!     Ok(())
//! }
//! ```

use crate::config::JiigConfig;
use crate::domain::RecordSet;
use crate::error::Result;
use crate::pipeline::{self, PipelineConfig, PipelineOutput};
use crate::source::{CachedSource, JsonlSource, RecordSource};
use std::path::Path;

/// Application context for CLI operations.
pub struct App {
    /// Where the record table comes from (trait object for polymorphism)
    source: Box<dyn RecordSource>,

    /// Resolved configuration
    config: JiigConfig,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("source", &self.source.describe())
            .finish()
    }
}

impl App {
    /// Create an App for the given working directory.
    ///
    /// `config_path` and `data_file` are the `--config` and `--data` flags.
    /// Relative paths are resolved against `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be located or parsed.
    pub async fn from_directory(
        working_dir: &Path,
        config_path: Option<&Path>,
        data_file: Option<&Path>,
    ) -> Result<Self> {
        let mut config =
            JiigConfig::resolve(working_dir, config_path, |key| std::env::var(key).ok()).await?;
        if let Some(data_file) = data_file {
            config = config.with_data_file(data_file);
        }
        config.data_file = working_dir.join(&config.data_file);

        let source = CachedSource::new(JsonlSource::new(&config.data_file), config.cache_ttl());
        tracing::debug!(source = %source.describe(), "Initialized record source");

        Ok(Self::with_source(Box::new(source), config))
    }

    /// Create an App around an existing source.
    #[must_use]
    pub fn with_source(source: Box<dyn RecordSource>, config: JiigConfig) -> Self {
        Self { source, config }
    }

    /// Get the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &JiigConfig {
        &self.config
    }

    /// Get the data file the source reads.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.config.data_file
    }

    /// Pipeline settings taken from configuration alone.
    #[must_use]
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(self.config.filter_mode).with_layout(self.config.layout)
    }

    /// Fetch the full record table.
    ///
    /// # Errors
    ///
    /// Returns the source's fetch error.
    pub async fn records(&self) -> Result<RecordSet> {
        self.source.fetch().await
    }

    /// Fetch the table and run the pipeline over it.
    ///
    /// `Ok(None)` means the table was empty.
    ///
    /// # Errors
    ///
    /// Returns the source's fetch error.
    pub async fn run(&self, pipeline: &PipelineConfig) -> Result<Option<PipelineOutput>> {
        let records = self.records().await?;
        Ok(pipeline::run(&records, pipeline))
    }
}
