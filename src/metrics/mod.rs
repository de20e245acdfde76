// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Triangle mesh quality metrics.
//!
//! Every entry point takes an N×3 vertex table and an M×3 face table and is a
//! pure function of them. Each triangle goes through one evaluator
//! ([`evaluate_triangle`]) whose result feeds the whole-mesh reductions, the
//! per-triangle table and the distribution samples alike.
//!
//! Degenerate geometry never fails a computation. A triangle with a
//! zero-length edge only raises `has_zero_edge`; a zero-area triangle raises
//! `has_zero_area` and still contributes its angles. The only errors are
//! tables of the wrong width.
//!
//! Face indices must be valid rows of the vertex table. This is a
//! precondition, not a checked condition: out-of-range indices panic.

mod accumulator;
mod aggregate;
mod distribution;
mod edges;
mod error;
mod per_triangle;
mod triangle;

pub use accumulator::{QualityAccumulator, RunningStat};
pub use aggregate::{
    compute_aggregate_metrics, compute_legacy_metrics, AggregateMetrics, LegacyMetrics,
};
pub use distribution::{compute_distributions, MetricDistributions};
pub use edges::{compute_relative_edge_lengths, unique_edges, RelativeEdgeLengths};
pub use error::MetricsError;
pub use per_triangle::{compute_per_triangle_metrics, PerTriangleMetrics, TriangleMetrics};
pub use triangle::{evaluate_triangle, TriangleEvaluation};

use nalgebra::{DMatrix, Point3};

/// Reject tables that cannot be read as triangles over 3-D points.
pub fn validate_input(vertices: &DMatrix<f64>, faces: &DMatrix<usize>) -> Result<(), MetricsError> {
    if faces.ncols() != 3 {
        return Err(MetricsError::InvalidTopology {
            columns: faces.ncols(),
        });
    }
    if vertices.ncols() != 3 {
        return Err(MetricsError::InvalidVertexDimension {
            columns: vertices.ncols(),
        });
    }
    Ok(())
}

/// Statistic names in value order, for either layout
pub fn metric_names(legacy: bool) -> Vec<String> {
    let names: &[&str] = if legacy {
        &LegacyMetrics::NAMES
    } else {
        &AggregateMetrics::NAMES
    };
    names.iter().map(|n| n.to_string()).collect()
}

fn triangle_corners(vertices: &DMatrix<f64>, faces: &DMatrix<usize>, row: usize) -> [Point3<f64>; 3] {
    let point = |i: usize| Point3::new(vertices[(i, 0)], vertices[(i, 1)], vertices[(i, 2)]);
    [
        point(faces[(row, 0)]),
        point(faces[(row, 1)]),
        point(faces[(row, 2)]),
    ]
}
