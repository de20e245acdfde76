// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Per-triangle shape descriptor table

use super::triangle::{evaluate_triangle, TriangleEvaluation};
use super::{triangle_corners, validate_input, MetricsError};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Four shape descriptors of one triangle.
///
/// Degenerate triangles keep the fill values `0, 180, 0, 0` for whatever the
/// evaluator could not compute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangleMetrics {
    pub min_angle: f64,
    pub max_angle: f64,
    pub ratio: f64,
    pub shape: f64,
}

impl Default for TriangleMetrics {
    fn default() -> Self {
        Self {
            min_angle: 0.0,
            max_angle: 180.0,
            ratio: 0.0,
            shape: 0.0,
        }
    }
}

impl TriangleMetrics {
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_angle, self.max_angle, self.ratio, self.shape]
    }
}

impl From<&TriangleEvaluation> for TriangleMetrics {
    fn from(eval: &TriangleEvaluation) -> Self {
        let mut row = Self::default();
        if let (Some(min), Some(max)) = (eval.min_angle(), eval.max_angle()) {
            row.min_angle = min;
            row.max_angle = max;
        }
        if let TriangleEvaluation::Regular {
            radius_ratio,
            shape_quality,
            ..
        } = eval
        {
            row.ratio = *radius_ratio;
            row.shape = *shape_quality;
        }
        row
    }
}

/// One [`TriangleMetrics`] row per input triangle, in input order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerTriangleMetrics {
    pub rows: Vec<TriangleMetrics>,
}

impl PerTriangleMetrics {
    pub const NAMES: [&'static str; 4] = ["min_angle", "max_angle", "ratio", "shape"];

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TriangleMetrics> {
        self.rows.iter()
    }

    /// The table as an M×4 matrix
    pub fn to_matrix(&self) -> DMatrix<f64> {
        let data: Vec<f64> = self.rows.iter().flat_map(|r| r.to_array()).collect();
        DMatrix::from_row_slice(self.rows.len(), Self::NAMES.len(), &data)
    }
}

impl<'a> IntoIterator for &'a PerTriangleMetrics {
    type Item = &'a TriangleMetrics;
    type IntoIter = std::slice::Iter<'a, TriangleMetrics>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Evaluate every triangle on its own.
///
/// # Errors
///
/// [`MetricsError::InvalidTopology`] if `faces` does not have three columns.
pub fn compute_per_triangle_metrics(
    vertices: &DMatrix<f64>,
    faces: &DMatrix<usize>,
) -> Result<PerTriangleMetrics, MetricsError> {
    validate_input(vertices, faces)?;
    let rows = (0..faces.nrows())
        .map(|row| {
            let [v0, v1, v2] = triangle_corners(vertices, faces, row);
            TriangleMetrics::from(&evaluate_triangle(&v0, &v1, &v2))
        })
        .collect();
    Ok(PerTriangleMetrics { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use approx::assert_relative_eq;

    #[test]
    fn test_rows_follow_input_order() {
        let mesh = Mesh::from_rows(
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [2.0, 0.0, 0.0],
            ],
            &[[0, 1, 2], [0, 0, 2], [0, 1, 3]],
        );
        let table = mesh.per_triangle_metrics().unwrap();
        assert_eq!(table.len(), 3);

        let regular = table.rows[0];
        assert_relative_eq!(regular.min_angle, 45.0, epsilon = 1e-9);
        assert_relative_eq!(regular.max_angle, 90.0, epsilon = 1e-9);
        assert!(regular.ratio > 0.0 && regular.ratio < 1.0);

        // Zero edge: every column keeps its fill value
        assert_eq!(table.rows[1], TriangleMetrics::default());

        // Collinear: angles are computed, ratio and shape are not
        let flat = table.rows[2];
        assert_eq!(flat.min_angle, 0.0);
        assert_eq!(flat.max_angle, 180.0);
        assert_eq!(flat.ratio, 0.0);
        assert_eq!(flat.shape, 0.0);
    }

    #[test]
    fn test_matrix_shape() {
        let mesh = Mesh::from_rows(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[[0, 1, 2], [2, 1, 0]],
        );
        let matrix = mesh.per_triangle_metrics().unwrap().to_matrix();
        assert_eq!(matrix.shape(), (2, 4));
        assert_relative_eq!(matrix[(1, 1)], 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = Mesh::new().per_triangle_metrics().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.to_matrix().nrows(), 0);
    }
}
