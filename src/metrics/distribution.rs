// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Raw samples behind the aggregate statistics, for histogramming

use super::edges::compute_relative_edge_lengths;
use super::triangle::{evaluate_triangle, TriangleEvaluation};
use super::{triangle_corners, validate_input, MetricsError};
use crate::utils::serde_float::null_as_nan_vec;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Sorted samples of each quality measure over a whole mesh
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricDistributions {
    /// Every interior angle of every triangle without a zero edge
    #[serde(rename = "angle")]
    pub angles: Vec<f64>,
    /// Radius ratio per triangle; zero-area triangles record 0
    #[serde(rename = "radius_ratio")]
    pub radius_ratios: Vec<f64>,
    #[serde(rename = "shape_quality")]
    pub shape_qualities: Vec<f64>,
    /// Relative length of every unique edge
    #[serde(rename = "edge_length", deserialize_with = "null_as_nan_vec")]
    pub edge_lengths: Vec<f64>,
    #[serde(rename = "#F")]
    pub num_f: usize,
    #[serde(rename = "#V")]
    pub num_v: usize,
}

fn sort_samples(values: &mut [f64]) {
    values.sort_by(|a, b| a.total_cmp(b));
}

/// Collect the samples.
///
/// # Errors
///
/// [`MetricsError::InvalidTopology`] if `faces` does not have three columns.
pub fn compute_distributions(
    vertices: &DMatrix<f64>,
    faces: &DMatrix<usize>,
) -> Result<MetricDistributions, MetricsError> {
    validate_input(vertices, faces)?;

    let mut dist = MetricDistributions {
        num_f: faces.nrows(),
        num_v: vertices.nrows(),
        ..Default::default()
    };

    for row in 0..faces.nrows() {
        let [v0, v1, v2] = triangle_corners(vertices, faces, row);
        let eval = evaluate_triangle(&v0, &v1, &v2);
        if let Some(angles) = eval.angles() {
            dist.angles.extend_from_slice(&angles);
        }
        match eval {
            TriangleEvaluation::ZeroEdge => {}
            TriangleEvaluation::ZeroArea { .. } => dist.radius_ratios.push(0.0),
            TriangleEvaluation::Regular {
                radius_ratio,
                shape_quality,
                ..
            } => {
                dist.radius_ratios.push(radius_ratio);
                dist.shape_qualities.push(shape_quality);
            }
        }
    }

    dist.edge_lengths = compute_relative_edge_lengths(vertices, faces)?.values;

    sort_samples(&mut dist.angles);
    sort_samples(&mut dist.radius_ratios);
    sort_samples(&mut dist.shape_qualities);
    sort_samples(&mut dist.edge_lengths);
    Ok(dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;

    #[test]
    fn test_samples_are_sorted_and_counted() {
        let mesh = Mesh::from_rows(
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [2.0, 0.0, 0.0],
            ],
            &[[0, 1, 2], [0, 0, 1], [0, 1, 3]],
        );
        let dist = mesh.distributions().unwrap();

        assert_eq!(dist.num_f, 3);
        assert_eq!(dist.num_v, 4);
        // Regular and collinear triangles contribute three angles each
        assert_eq!(dist.angles.len(), 6);
        assert!(dist.angles.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(dist.radius_ratios.len(), 2);
        assert_eq!(dist.radius_ratios[0], 0.0);
        assert_eq!(dist.shape_qualities.len(), 1);
    }

    #[test]
    fn test_json_keys() {
        let dist = Mesh::new().distributions().unwrap();
        let json = serde_json::to_value(&dist).unwrap();
        for key in ["angle", "radius_ratio", "shape_quality", "edge_length", "#F", "#V"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_collapsed_mesh_round_trips() {
        let mesh = Mesh::from_rows(&[[3.0, 3.0, 3.0]; 3], &[[0, 1, 2]]);
        let dist = mesh.distributions().unwrap();
        assert_eq!(dist.edge_lengths.len(), 3);

        let json = serde_json::to_string(&dist).unwrap();
        let back: MetricDistributions = serde_json::from_str(&json).unwrap();
        assert!(back.angles.is_empty());
        assert!(back.edge_lengths.iter().all(|v| v.is_nan()));
        assert_eq!(back.num_f, 1);
    }
}
