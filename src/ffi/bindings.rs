// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Node.js bindings using napi-rs

use super::mesh_from_buffers;
use napi::bindgen_prelude::*;
use napi_derive::napi;

fn to_napi(err: impl std::fmt::Display) -> Error {
    Error::from_reason(format!("Metrics error: {}", err))
}

#[napi]
pub struct JsMesh {
    inner: crate::geometry::Mesh,
}

#[napi]
impl JsMesh {
    /// Wrap typed-array vertex and face buffers
    #[napi(constructor)]
    pub fn new(vertices: Float64Array, faces: Uint32Array, face_width: u32) -> Result<Self> {
        let inner = mesh_from_buffers(&vertices, &faces, face_width as usize).map_err(to_napi)?;
        Ok(JsMesh { inner })
    }

    /// Get vertex count
    #[napi]
    pub fn vertex_count(&self) -> u32 {
        self.inner.vertex_count() as u32
    }

    /// Get triangle count
    #[napi]
    pub fn triangle_count(&self) -> u32 {
        self.inner.triangle_count() as u32
    }

    #[napi]
    pub fn aggregate_metrics(&self) -> Result<Vec<f64>> {
        Ok(self.inner.aggregate_metrics().map_err(to_napi)?.to_array().to_vec())
    }

    /// Per-triangle table flattened row-major, four values per triangle
    #[napi]
    pub fn per_triangle_metrics(&self) -> Result<Vec<f64>> {
        let table = self.inner.per_triangle_metrics().map_err(to_napi)?;
        Ok(table.iter().flat_map(|row| row.to_array()).collect())
    }

    #[napi]
    pub fn relative_edge_lengths(&self) -> Result<Vec<f64>> {
        Ok(self.inner.relative_edge_lengths().map_err(to_napi)?.values)
    }
}

/// The 19 statistics of a mesh given as typed arrays
#[napi]
pub fn compute_aggregate_metrics(
    vertices: Float64Array,
    faces: Uint32Array,
    face_width: u32,
) -> Result<Vec<f64>> {
    let mesh = mesh_from_buffers(&vertices, &faces, face_width as usize).map_err(to_napi)?;
    Ok(mesh.aggregate_metrics().map_err(to_napi)?.to_array().to_vec())
}

#[napi]
pub fn compute_legacy_metrics(
    vertices: Float64Array,
    faces: Uint32Array,
    face_width: u32,
) -> Result<Vec<f64>> {
    let mesh = mesh_from_buffers(&vertices, &faces, face_width as usize).map_err(to_napi)?;
    Ok(mesh.legacy_metrics().map_err(to_napi)?.to_array().to_vec())
}

#[napi]
pub fn metric_names(legacy: bool) -> Vec<String> {
    super::metric_names(legacy)
}

#[napi]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
