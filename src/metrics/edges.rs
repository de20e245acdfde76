// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Unique undirected edges and their relative lengths

use super::{validate_input, MetricsError};
use crate::geometry::BoundingBox;
use crate::utils::serde_float::null_as_nan_vec;
use nalgebra::{DMatrix, Point3};
use serde::{Deserialize, Serialize};

/// Undirected edges of `faces` as `(low, high)` vertex pairs, each listed once,
/// in ascending order.
///
/// Assumes three columns; callers validate first.
pub fn unique_edges(faces: &DMatrix<usize>) -> Vec<(usize, usize)> {
    let mut edges = Vec::with_capacity(faces.nrows() * 3);
    for row in 0..faces.nrows() {
        let f = [faces[(row, 0)], faces[(row, 1)], faces[(row, 2)]];
        for (a, b) in [(f[0], f[1]), (f[1], f[2]), (f[2], f[0])] {
            edges.push((a.min(b), a.max(b)));
        }
    }
    edges.sort_unstable();
    edges.dedup();
    edges
}

/// One length per unique edge, divided by the bounding-box diagonal.
///
/// `values[i]` belongs to `edges[i]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelativeEdgeLengths {
    pub edges: Vec<(usize, usize)>,
    #[serde(deserialize_with = "null_as_nan_vec")]
    pub values: Vec<f64>,
}

impl RelativeEdgeLengths {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &f64)> {
        self.edges.iter().zip(&self.values)
    }
}

/// Relative length of every unique edge.
///
/// A zero bounding-box diagonal is not guarded: the values become NaN or
/// infinite.
///
/// # Errors
///
/// [`MetricsError::InvalidTopology`] if `faces` does not have three columns.
pub fn compute_relative_edge_lengths(
    vertices: &DMatrix<f64>,
    faces: &DMatrix<usize>,
) -> Result<RelativeEdgeLengths, MetricsError> {
    validate_input(vertices, faces)?;
    let diagonal = BoundingBox::from_vertices(vertices).diagonal();
    let point = |i: usize| Point3::new(vertices[(i, 0)], vertices[(i, 1)], vertices[(i, 2)]);

    let edges = unique_edges(faces);
    let values = edges
        .iter()
        .map(|&(a, b)| (point(b) - point(a)).norm() / diagonal)
        .collect();
    Ok(RelativeEdgeLengths { edges, values })
}
