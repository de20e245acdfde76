// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Whole-mesh quality statistics

use super::accumulator::QualityAccumulator;
use super::triangle::evaluate_triangle;
use super::{triangle_corners, validate_input, MetricsError};
use crate::geometry::BoundingBox;
use crate::utils::serde_float::null_as_infinity;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Whole-mesh statistics with separate views of each triangle's smallest
/// and largest angle.
///
/// Angles are in degrees; edge lengths are relative to the bounding-box
/// diagonal. A `min_*` field equal to `+inf` means no triangle contributed
/// to it and should be read as "undefined". JSON writes it as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    #[serde(deserialize_with = "null_as_infinity")]
    pub min_min_angle: f64,
    pub max_min_angle: f64,
    pub avg_min_angle: f64,
    #[serde(deserialize_with = "null_as_infinity")]
    pub min_max_angle: f64,
    pub max_max_angle: f64,
    pub avg_max_angle: f64,
    #[serde(deserialize_with = "null_as_infinity")]
    pub min_ratio: f64,
    pub max_ratio: f64,
    pub avg_ratio: f64,
    #[serde(deserialize_with = "null_as_infinity")]
    pub min_shape: f64,
    pub max_shape: f64,
    pub avg_shape: f64,
    #[serde(deserialize_with = "null_as_infinity")]
    pub min_edge: f64,
    pub max_edge: f64,
    pub avg_edge: f64,
    #[serde(rename = "#F")]
    pub num_f: usize,
    #[serde(rename = "#V")]
    pub num_v: usize,
    pub has_zero_area: bool,
    pub has_zero_edge: bool,
}

impl AggregateMetrics {
    pub const LEN: usize = 19;

    /// Display names, positionally matching [`AggregateMetrics::to_array`]
    pub const NAMES: [&'static str; Self::LEN] = [
        "min_min_angle",
        "max_min_angle",
        "avg_min_angle",
        "min_max_angle",
        "max_max_angle",
        "avg_max_angle",
        "min_ratio",
        "max_ratio",
        "avg_ratio",
        "min_shape",
        "max_shape",
        "avg_shape",
        "min_edge",
        "max_edge",
        "avg_edge",
        "#F",
        "#V",
        "has_zero_area",
        "has_zero_edge",
    ];

    /// Values as a flat array; counts and flags become plain numbers
    pub fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.min_min_angle,
            self.max_min_angle,
            self.avg_min_angle,
            self.min_max_angle,
            self.max_max_angle,
            self.avg_max_angle,
            self.min_ratio,
            self.max_ratio,
            self.avg_ratio,
            self.min_shape,
            self.max_shape,
            self.avg_shape,
            self.min_edge,
            self.max_edge,
            self.avg_edge,
            self.num_f as f64,
            self.num_v as f64,
            flag(self.has_zero_area),
            flag(self.has_zero_edge),
        ]
    }

    /// `(name, value)` pairs in output order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        Self::NAMES.into_iter().zip(self.to_array())
    }
}

/// Whole-mesh statistics in the original 16-field layout, where the angle
/// statistics pool all three angles of every triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyMetrics {
    #[serde(deserialize_with = "null_as_infinity")]
    pub min_angle: f64,
    pub max_angle: f64,
    pub avg_angle: f64,
    #[serde(deserialize_with = "null_as_infinity")]
    pub min_ratio: f64,
    pub max_ratio: f64,
    pub avg_ratio: f64,
    #[serde(deserialize_with = "null_as_infinity")]
    pub min_shape: f64,
    pub max_shape: f64,
    pub avg_shape: f64,
    #[serde(deserialize_with = "null_as_infinity")]
    pub min_edge: f64,
    pub max_edge: f64,
    pub avg_edge: f64,
    #[serde(rename = "#F")]
    pub num_f: usize,
    #[serde(rename = "#V")]
    pub num_v: usize,
    pub has_zero_area: bool,
    pub has_zero_edge: bool,
}

impl LegacyMetrics {
    pub const LEN: usize = 16;

    pub const NAMES: [&'static str; Self::LEN] = [
        "min_angle",
        "max_angle",
        "avg_angle",
        "min_ratio",
        "max_ratio",
        "avg_ratio",
        "min_shape",
        "max_shape",
        "avg_shape",
        "min_edge",
        "max_edge",
        "avg_edge",
        "#F",
        "#V",
        "has_zero_area",
        "has_zero_edge",
    ];

    pub fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.min_angle,
            self.max_angle,
            self.avg_angle,
            self.min_ratio,
            self.max_ratio,
            self.avg_ratio,
            self.min_shape,
            self.max_shape,
            self.avg_shape,
            self.min_edge,
            self.max_edge,
            self.avg_edge,
            self.num_f as f64,
            self.num_v as f64,
            flag(self.has_zero_area),
            flag(self.has_zero_edge),
        ]
    }

    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        Self::NAMES.into_iter().zip(self.to_array())
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Fold every triangle of the mesh into one accumulator
pub(crate) fn accumulate(vertices: &DMatrix<f64>, faces: &DMatrix<usize>) -> QualityAccumulator {
    let mut acc = QualityAccumulator::new();
    for row in 0..faces.nrows() {
        let [v0, v1, v2] = triangle_corners(vertices, faces, row);
        acc.push(&evaluate_triangle(&v0, &v1, &v2));
    }
    acc
}

/// Compute the 19 whole-mesh statistics.
///
/// Every face index must be a valid row of `vertices`; out-of-range indices
/// panic.
///
/// # Errors
///
/// [`MetricsError::InvalidTopology`] if `faces` does not have three columns,
/// [`MetricsError::InvalidVertexDimension`] if `vertices` does not.
pub fn compute_aggregate_metrics(
    vertices: &DMatrix<f64>,
    faces: &DMatrix<usize>,
) -> Result<AggregateMetrics, MetricsError> {
    validate_input(vertices, faces)?;
    let diagonal = BoundingBox::from_vertices(vertices).diagonal();
    Ok(accumulate(vertices, faces).finish(faces.nrows(), vertices.nrows(), diagonal))
}

/// Compute the 16 whole-mesh statistics of the legacy layout.
///
/// # Errors
///
/// Same as [`compute_aggregate_metrics`].
pub fn compute_legacy_metrics(
    vertices: &DMatrix<f64>,
    faces: &DMatrix<usize>,
) -> Result<LegacyMetrics, MetricsError> {
    validate_input(vertices, faces)?;
    let diagonal = BoundingBox::from_vertices(vertices).diagonal();
    Ok(accumulate(vertices, faces).finish_legacy(faces.nrows(), vertices.nrows(), diagonal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Mesh, Primitive};
    use approx::assert_relative_eq;

    #[test]
    fn test_names_match_array_width() {
        let metrics = Mesh::new().aggregate_metrics().unwrap();
        assert_eq!(metrics.named().count(), AggregateMetrics::LEN);
        let legacy = Mesh::new().legacy_metrics().unwrap();
        assert_eq!(legacy.named().count(), LegacyMetrics::LEN);
    }

    #[test]
    fn test_tetrahedron_is_ideal() {
        let metrics = Primitive::tetrahedron(1.0).to_mesh().aggregate_metrics().unwrap();
        assert_relative_eq!(metrics.min_min_angle, 60.0, epsilon = 1e-6);
        assert_relative_eq!(metrics.max_max_angle, 60.0, epsilon = 1e-6);
        assert_relative_eq!(metrics.min_ratio, 1.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.avg_shape, 1.0, epsilon = 1e-9);
        assert_eq!(metrics.num_f, 4);
        assert_eq!(metrics.num_v, 4);
        assert!(!metrics.has_zero_area);
        assert!(!metrics.has_zero_edge);
    }

    #[test]
    fn test_cube_edges_relative_to_diagonal() {
        let metrics = Primitive::cube(nalgebra::Vector3::new(1.0, 1.0, 1.0), true)
            .to_mesh()
            .aggregate_metrics()
            .unwrap();
        let diagonal = 3.0_f64.sqrt();
        assert_relative_eq!(metrics.min_edge, 1.0 / diagonal, epsilon = 1e-12);
        assert_relative_eq!(metrics.max_edge, 2.0_f64.sqrt() / diagonal, epsilon = 1e-12);
        assert_relative_eq!(metrics.min_min_angle, 45.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.max_max_angle, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_flags_become_numbers() {
        let mesh = Mesh::from_rows(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            &[[0, 1, 2], [0, 0, 1]],
        );
        let values = mesh.aggregate_metrics().unwrap().to_array();
        assert_eq!(values[15], 2.0);
        assert_eq!(values[16], 3.0);
        assert_eq!(values[17], 1.0);
        assert_eq!(values[18], 1.0);
    }

    #[test]
    fn test_serializes_with_display_names() {
        let metrics = Primitive::equilateral(1.0).to_mesh().aggregate_metrics().unwrap();
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["#F"], 1);
        assert_eq!(json["#V"], 3);
        assert_eq!(json["has_zero_edge"], false);
    }

    #[test]
    fn test_undefined_minimums_survive_json() {
        let mesh = Mesh::from_rows(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], &[[0, 0, 1]]);
        let metrics = mesh.aggregate_metrics().unwrap();
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.starts_with(r#"{"min_min_angle":null"#));
        let back: AggregateMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metrics);
        assert_eq!(back.min_edge, f64::INFINITY);

        let legacy = Mesh::new().legacy_metrics().unwrap();
        let back: LegacyMetrics =
            serde_json::from_str(&serde_json::to_string(&legacy).unwrap()).unwrap();
        assert_eq!(back, legacy);
        assert_eq!(back.min_angle, f64::INFINITY);
    }
}
