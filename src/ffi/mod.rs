// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! FFI bindings for WASM and Node.js
//!
//! Both bindings take flat row-major buffers: `vertices` holds `x, y, z` per
//! vertex and `faces` holds `face_width` indices per face.

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(feature = "napi")]
pub mod bindings;

use crate::geometry::Mesh;
use crate::metrics::MetricsError;

pub use crate::metrics::metric_names;

/// Build a mesh from host buffers with 32-bit indices
pub fn mesh_from_buffers(
    vertices: &[f64],
    faces: &[u32],
    face_width: usize,
) -> Result<Mesh, MetricsError> {
    let faces: Vec<usize> = faces.iter().map(|&i| i as usize).collect();
    Mesh::from_flat(vertices, &faces, face_width)
}
