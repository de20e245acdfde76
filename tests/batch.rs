// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Directory discovery and batch CSV output

use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use trimetric::cli::{discover_meshes, evaluate_batch, BatchReport};
use trimetric::{AggregateMetrics, LegacyMetrics};

const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
const POINTS_ONLY: &str = "v 0 0 0\nv 1 0 0\n";

fn dataset() -> Result<TempDir> {
    let dir = TempDir::new()?;
    fs::create_dir_all(dir.path().join("nested"))?;
    fs::write(dir.path().join("b.obj"), TRIANGLE)?;
    fs::write(dir.path().join("nested/a.obj"), TRIANGLE)?;
    fs::write(dir.path().join("b_edges.obj"), TRIANGLE)?;
    fs::write(dir.path().join("empty.obj"), POINTS_ONLY)?;
    fs::write(dir.path().join("broken.obj"), "v 0 0 0\nf 1 2 3\n")?;
    fs::write(dir.path().join("notes.txt"), "ignored")?;
    Ok(dir)
}

#[test]
fn discovery_filters_and_sorts() -> Result<()> {
    let dir = dataset()?;
    let files = discover_meshes(dir.path(), ".obj")?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();

    assert_eq!(names.len(), 4);
    assert!(!names.iter().any(|n| n.ends_with("_edges.obj")));
    assert!(!names.iter().any(|n| n.ends_with(".txt")));
    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
    Ok(())
}

#[test]
fn single_file_is_returned_as_is() -> Result<()> {
    let dir = dataset()?;
    let file = dir.path().join("b_edges.obj");
    assert_eq!(discover_meshes(&file, ".obj")?, vec![file]);
    assert!(discover_meshes(&dir.path().join("missing"), ".obj").is_err());
    Ok(())
}

#[test]
fn batch_skips_empty_and_records_failures() -> Result<()> {
    let dir = dataset()?;
    let files = discover_meshes(dir.path(), ".obj")?;
    let report = evaluate_batch(&files, Some(2), false)?;

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].mesh_file.ends_with("broken.obj"));
    assert_eq!(report.names.len(), AggregateMetrics::LEN);
    for row in &report.rows {
        assert_eq!(row.values.len(), AggregateMetrics::LEN);
        assert_eq!(row.values[15], 1.0);
        assert_eq!(row.values[16], 3.0);
    }
    Ok(())
}

#[test]
fn csv_has_header_and_mesh_column() -> Result<()> {
    let dir = dataset()?;
    let files = discover_meshes(dir.path(), ".obj")?;
    let report = evaluate_batch(&files, Some(1), true)?;

    let out = dir.path().join("metrics.csv");
    report.write_csv(&out)?;
    let csv = fs::read_to_string(&out)?;
    let lines: Vec<&str> = csv.lines().collect();

    let mut header = LegacyMetrics::NAMES.join(",");
    header.push_str(",mesh_file");
    assert_eq!(lines[0], header);
    assert_eq!(lines.len(), 1 + 2);
    assert!(lines[1].ends_with("a.obj") || lines[1].ends_with("b.obj"));
    assert_eq!(lines[1].split(',').count(), LegacyMetrics::LEN + 1);

    let json_path = dir.path().join("metrics.json");
    report.write_json(&json_path)?;
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
    assert_eq!(json["rows"].as_array().map(|r| r.len()), Some(2));
    Ok(())
}

#[test]
fn json_report_reads_back_undefined_minimums() -> Result<()> {
    let dir = TempDir::new()?;
    // Every triangle has a zero-length edge, so no minimum is ever set
    let path = dir.path().join("collapsed.obj");
    fs::write(&path, "v 0 0 0\nv 1 0 0\nf 1 1 2\n")?;
    let report = evaluate_batch(&[path], Some(1), false)?;
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].values[0], f64::INFINITY);

    let json_path = dir.path().join("collapsed.json");
    report.write_json(&json_path)?;
    let back: BatchReport = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
    assert_eq!(back, report);
    Ok(())
}
