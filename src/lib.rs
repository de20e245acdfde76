// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Trimetric
//!
//! Quality diagnostics for triangle meshes: interior angles, radius ratio,
//! shape regularity and relative edge length, reduced over the whole mesh or
//! reported per triangle. Degenerate triangles (zero-length edges, zero area)
//! are flagged rather than rejected.
//!
//! ```
//! use trimetric::Mesh;
//!
//! let mesh = Mesh::from_rows(
//!     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//!     &[[0, 1, 2]],
//! );
//! let metrics = mesh.aggregate_metrics()?;
//! assert_eq!(metrics.num_f, 1);
//! assert!((metrics.max_max_angle - 90.0).abs() < 1e-9);
//! # Ok::<(), trimetric::MetricsError>(())
//! ```

pub mod cli;
pub mod config;
pub mod geometry;
pub mod io;
pub mod metrics;
pub mod utils;

#[cfg(any(feature = "wasm", feature = "napi"))]
pub mod ffi;

pub use config::MetricsConfig;
pub use geometry::{BoundingBox, Mesh, Primitive};
pub use io::{load_mesh, MeshLoadError};
pub use metrics::{
    compute_aggregate_metrics, compute_distributions, compute_legacy_metrics,
    compute_per_triangle_metrics, compute_relative_edge_lengths, AggregateMetrics, LegacyMetrics,
    MetricDistributions, MetricsError, PerTriangleMetrics, RelativeEdgeLengths,
};

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Everything the report command prints for one mesh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub aggregate: AggregateMetrics,
    pub legacy: LegacyMetrics,
    pub per_triangle: PerTriangleMetrics,
    pub edge_lengths: RelativeEdgeLengths,
}

/// Compute every metric of a mesh
pub fn evaluate(mesh: &Mesh) -> Result<QualityReport, MetricsError> {
    Ok(QualityReport {
        aggregate: mesh.aggregate_metrics()?,
        legacy: mesh.legacy_metrics()?,
        per_triangle: mesh.per_triangle_metrics()?,
        edge_lengths: mesh.relative_edge_lengths()?,
    })
}

/// Load a mesh file and compute every metric
pub fn evaluate_file(path: impl AsRef<Path>) -> Result<QualityReport> {
    let path = path.as_ref();
    let mesh = load_mesh(path).with_context(|| format!("Failed to load mesh: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        "evaluating mesh"
    );
    evaluate(&mesh).with_context(|| format!("Failed to evaluate mesh: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_tetrahedron() {
        let report = evaluate(&Primitive::tetrahedron(1.0).to_mesh()).unwrap();
        assert_eq!(report.aggregate.num_f, 4);
        assert_eq!(report.per_triangle.len(), 4);
        assert_eq!(report.edge_lengths.len(), 6);
    }
}
