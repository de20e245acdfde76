// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Error types for metric computation.

use thiserror::Error;

/// Errors raised when the input tables cannot be read as a triangle mesh.
///
/// Degenerate geometry is never an error: zero-length edges and zero-area
/// triangles are reported through flags in the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// The face table does not have exactly three indices per row.
    #[error("invalid topology: face table has {columns} columns, expected 3")]
    InvalidTopology {
        /// Column count of the rejected table.
        columns: usize,
    },

    /// The vertex table does not hold 3-D points.
    #[error("invalid vertex table: {columns} columns, expected 3")]
    InvalidVertexDimension {
        /// Column count of the rejected table.
        columns: usize,
    },

    /// A flat buffer does not divide into whole rows.
    #[error("buffer of {len} values is not a whole number of rows of width {width}")]
    MalformedBuffer {
        /// Number of values in the buffer.
        len: usize,
        /// Expected row width.
        width: usize,
    },
}
