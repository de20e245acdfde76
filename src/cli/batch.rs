// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Batch evaluation of a directory of meshes into one CSV table

use crate::io::load_mesh;
use crate::metrics::{AggregateMetrics, LegacyMetrics};
use crate::utils::serde_float::null_as_infinity_vec;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Mesh files to evaluate under `root`.
///
/// A file path is returned as is. A directory is searched recursively for
/// names ending in `extension`, excluding `*_edges{extension}` companions.
/// The result is sorted.
pub fn discover_meshes(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        bail!("Path not found: {}", root.display());
    }

    let edges_suffix = format!("_edges{}", extension);
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            name.ends_with(extension) && !name.ends_with(&edges_suffix)
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();

    debug!(root = %root.display(), count = files.len(), "discovered meshes");
    Ok(files)
}

/// Statistics of one evaluated mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    pub mesh_file: String,
    /// Undefined minimums are `+inf`
    #[serde(deserialize_with = "null_as_infinity_vec")]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub mesh_file: String,
    pub error: String,
}

/// Results of a batch, in discovery order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Column names of `BatchRow::values`
    pub names: Vec<String>,
    pub rows: Vec<BatchRow>,
    /// Meshes without triangles
    pub skipped: Vec<String>,
    pub failures: Vec<BatchFailure>,
}

enum Outcome {
    Evaluated(Vec<f64>),
    Empty,
}

fn evaluate_one(path: &Path, legacy: bool) -> Result<Outcome> {
    let mesh = load_mesh(path).with_context(|| format!("Failed to load {}", path.display()))?;
    if mesh.is_empty() {
        return Ok(Outcome::Empty);
    }
    let values = if legacy {
        mesh.legacy_metrics()?.to_array().to_vec()
    } else {
        mesh.aggregate_metrics()?.to_array().to_vec()
    };
    Ok(Outcome::Evaluated(values))
}

/// Evaluate every file on a rayon pool of `jobs` threads (None = one per core).
///
/// A file that fails to load or evaluate is recorded in
/// [`BatchReport::failures`] and does not stop the batch.
pub fn evaluate_batch(files: &[PathBuf], jobs: Option<usize>, legacy: bool) -> Result<BatchReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
        .context("Failed to build worker pool")?;

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let outcomes: Vec<(String, Result<Outcome>)> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let outcome = evaluate_one(path, legacy);
                progress.inc(1);
                (path.display().to_string(), outcome)
            })
            .collect()
    });
    progress.finish_and_clear();

    let names: &[&str] = if legacy {
        &LegacyMetrics::NAMES
    } else {
        &AggregateMetrics::NAMES
    };
    let mut report = BatchReport {
        names: names.iter().map(|n| n.to_string()).collect(),
        ..Default::default()
    };

    for (mesh_file, outcome) in outcomes {
        match outcome {
            Ok(Outcome::Evaluated(values)) => report.rows.push(BatchRow { mesh_file, values }),
            Ok(Outcome::Empty) => {
                warn!(mesh = %mesh_file, "skipping mesh without triangles");
                report.skipped.push(mesh_file);
            }
            Err(err) => {
                warn!(mesh = %mesh_file, error = %format!("{:#}", err), "mesh evaluation failed");
                report.failures.push(BatchFailure {
                    mesh_file,
                    error: format!("{:#}", err),
                });
            }
        }
    }

    Ok(report)
}

/// Quote a CSV field if it needs it
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl BatchReport {
    /// CSV with one row per evaluated mesh and a trailing `mesh_file` column
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        let header: Vec<String> = self
            .names
            .iter()
            .map(|n| csv_field(n))
            .chain(std::iter::once("mesh_file".to_string()))
            .collect();
        out.push_str(&header.join(","));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = row
                .values
                .iter()
                .map(|v| v.to_string())
                .chain(std::iter::once(csv_field(&row.mesh_file)))
                .collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv())
            .with_context(|| format!("Failed to write CSV: {}", path.display()))
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write JSON: {}", path.display()))
    }
}
