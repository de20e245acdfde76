// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Mesh representation and utilities

use super::BoundingBox;
use crate::metrics::{
    self, AggregateMetrics, LegacyMetrics, MetricDistributions, MetricsError,
    PerTriangleMetrics, RelativeEdgeLengths,
};
use nalgebra::{DMatrix, Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Triangle soup: an N×3 vertex table and an M×3 table of vertex indices.
///
/// The face table is kept as a dynamic matrix so that inputs of the wrong
/// width can be represented and rejected by the metrics functions instead of
/// being silently truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: DMatrix<f64>,
    pub faces: DMatrix<usize>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: DMatrix::zeros(0, 3),
            faces: DMatrix::zeros(0, 3),
        }
    }

    /// Build a mesh from row-major vertex positions and index triples
    pub fn from_rows(vertices: &[[f64; 3]], faces: &[[usize; 3]]) -> Self {
        let vertex_data: Vec<f64> = vertices.iter().flatten().copied().collect();
        let face_data: Vec<usize> = faces.iter().flatten().copied().collect();
        Self {
            vertices: DMatrix::from_row_slice(vertices.len(), 3, &vertex_data),
            faces: DMatrix::from_row_slice(faces.len(), 3, &face_data),
        }
    }

    /// Build a mesh from flat row-major buffers, as handed over by script bindings.
    ///
    /// `face_width` is the number of indices per face row. Widths other than 3
    /// are accepted here and rejected later by the metrics functions.
    pub fn from_flat(
        vertices: &[f64],
        faces: &[usize],
        face_width: usize,
    ) -> Result<Self, MetricsError> {
        if vertices.len() % 3 != 0 {
            return Err(MetricsError::MalformedBuffer {
                len: vertices.len(),
                width: 3,
            });
        }
        if face_width == 0 {
            return Err(MetricsError::InvalidTopology { columns: 0 });
        }
        if faces.len() % face_width != 0 {
            return Err(MetricsError::MalformedBuffer {
                len: faces.len(),
                width: face_width,
            });
        }

        Ok(Self {
            vertices: DMatrix::from_row_slice(vertices.len() / 3, 3, vertices),
            faces: DMatrix::from_row_slice(faces.len() / face_width, face_width, faces),
        })
    }

    /// Position of vertex `index`
    pub fn vertex(&self, index: usize) -> Point3<f64> {
        Point3::new(
            self.vertices[(index, 0)],
            self.vertices[(index, 1)],
            self.vertices[(index, 2)],
        )
    }

    /// Vertex indices of triangle `index`
    pub fn face(&self, index: usize) -> [usize; 3] {
        [
            self.faces[(index, 0)],
            self.faces[(index, 1)],
            self.faces[(index, 2)],
        ]
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.nrows()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.faces.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.nrows() == 0
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.vertices)
    }

    /// Transform all vertices by a homogeneous matrix
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for row in 0..self.vertices.nrows() {
            let p = matrix.transform_point(&self.vertex(row));
            self.vertices[(row, 0)] = p.x;
            self.vertices[(row, 1)] = p.y;
            self.vertices[(row, 2)] = p.z;
        }
    }

    /// Uniformly scale all vertex coordinates
    pub fn scale(&mut self, factor: f64) {
        self.vertices *= factor;
    }

    /// Translate all vertices
    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.transform(&Matrix4::new_translation(&offset));
    }

    /// Append another mesh, offsetting its indices past our vertices
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertex_count();
        let vertex_count = offset + other.vertex_count();
        let face_count = self.triangle_count() + other.triangle_count();

        let mut vertices = DMatrix::zeros(vertex_count, 3);
        vertices.rows_mut(0, offset).copy_from(&self.vertices);
        vertices
            .rows_mut(offset, other.vertex_count())
            .copy_from(&other.vertices);

        let mut faces = DMatrix::zeros(face_count, 3);
        faces
            .rows_mut(0, self.triangle_count())
            .copy_from(&self.faces);
        faces
            .rows_mut(self.triangle_count(), other.triangle_count())
            .copy_from(&other.faces.map(|i| i + offset));

        self.vertices = vertices;
        self.faces = faces;
    }

    /// Whole-mesh quality statistics
    pub fn aggregate_metrics(&self) -> Result<AggregateMetrics, MetricsError> {
        metrics::compute_aggregate_metrics(&self.vertices, &self.faces)
    }

    /// Whole-mesh statistics in the older 16-field layout
    pub fn legacy_metrics(&self) -> Result<LegacyMetrics, MetricsError> {
        metrics::compute_legacy_metrics(&self.vertices, &self.faces)
    }

    /// Shape descriptors of every triangle
    pub fn per_triangle_metrics(&self) -> Result<PerTriangleMetrics, MetricsError> {
        metrics::compute_per_triangle_metrics(&self.vertices, &self.faces)
    }

    /// Unique edge lengths relative to the bounding-box diagonal
    pub fn relative_edge_lengths(&self) -> Result<RelativeEdgeLengths, MetricsError> {
        metrics::compute_relative_edge_lengths(&self.vertices, &self.faces)
    }

    /// Sorted raw samples behind the aggregate statistics
    pub fn distributions(&self) -> Result<MetricDistributions, MetricsError> {
        metrics::compute_distributions(&self.vertices, &self.faces)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
