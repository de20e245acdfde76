// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Tool configuration: `trimetric.toml` plus environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, looked up in the working directory
pub const CONFIG_FILE: &str = "trimetric.toml";

/// Settings shared by the report and batch commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Rows of the per-triangle and edge tables printed before truncating
    pub table_rows: usize,
    /// Worker threads for batch evaluation (None = one per core)
    pub jobs: Option<usize>,
    /// Mesh file extension searched for in batch mode
    pub extension: String,
    /// Report the 16-field pooled-angle statistics instead of the split ones
    pub legacy: bool,
    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
    /// CSV written by batch mode
    pub output: PathBuf,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            table_rows: 20,
            jobs: None,
            extension: ".obj".to_string(),
            legacy: false,
            log_level: "warn".to_string(),
            output: PathBuf::from("mesh_quality_metrics.csv"),
        }
    }
}

impl MetricsConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: MetricsConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `trimetric.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `TRIMETRIC_*` overrides read through `lookup`.
    ///
    /// Values that fail to parse leave the setting unchanged.
    /// `TRIMETRIC_JOBS=0` selects the rayon default.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(rows) = lookup("TRIMETRIC_TABLE_ROWS").and_then(|v| v.parse().ok()) {
            self.table_rows = rows;
        }

        if let Some(jobs) = lookup("TRIMETRIC_JOBS").and_then(|v| v.parse::<usize>().ok()) {
            self.jobs = (jobs > 0).then_some(jobs);
        }

        if let Some(extension) = lookup("TRIMETRIC_EXTENSION") {
            self.extension = normalize_extension(&extension);
        }

        if let Some(level) = lookup("TRIMETRIC_LOG") {
            self.log_level = level;
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

/// `obj` and `.obj` both mean `.obj`
pub fn normalize_extension(extension: &str) -> String {
    if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    }
}
