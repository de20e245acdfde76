// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! WASM bindings using wasm-bindgen

use super::mesh_from_buffers;
use wasm_bindgen::prelude::*;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("Metrics error: {}", err))
}

#[wasm_bindgen]
pub struct WasmMesh {
    inner: crate::geometry::Mesh,
}

#[wasm_bindgen]
impl WasmMesh {
    /// Wrap flat vertex and face buffers
    #[wasm_bindgen(constructor)]
    pub fn new(vertices: &[f64], faces: &[u32], face_width: usize) -> Result<WasmMesh, JsValue> {
        let inner = mesh_from_buffers(vertices, faces, face_width).map_err(to_js)?;
        Ok(WasmMesh { inner })
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.inner.vertex_count()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.inner.triangle_count()
    }

    /// The 19 statistics, in `metric_names(false)` order
    pub fn aggregate_metrics(&self) -> Result<Vec<f64>, JsValue> {
        Ok(self.inner.aggregate_metrics().map_err(to_js)?.to_array().to_vec())
    }

    /// Per-triangle table flattened row-major, four values per triangle
    pub fn per_triangle_metrics(&self) -> Result<Vec<f64>, JsValue> {
        let table = self.inner.per_triangle_metrics().map_err(to_js)?;
        Ok(table.iter().flat_map(|row| row.to_array()).collect())
    }

    pub fn relative_edge_lengths(&self) -> Result<Vec<f64>, JsValue> {
        Ok(self.inner.relative_edge_lengths().map_err(to_js)?.values)
    }
}

/// The 19 statistics of a mesh given as flat buffers
#[wasm_bindgen]
pub fn compute_aggregate_metrics(
    vertices: &[f64],
    faces: &[u32],
    face_width: usize,
) -> Result<Vec<f64>, JsValue> {
    let mesh = mesh_from_buffers(vertices, faces, face_width).map_err(to_js)?;
    Ok(mesh.aggregate_metrics().map_err(to_js)?.to_array().to_vec())
}

/// The 16 pooled-angle statistics of a mesh given as flat buffers
#[wasm_bindgen]
pub fn compute_legacy_metrics(
    vertices: &[f64],
    faces: &[u32],
    face_width: usize,
) -> Result<Vec<f64>, JsValue> {
    let mesh = mesh_from_buffers(vertices, faces, face_width).map_err(to_js)?;
    Ok(mesh.legacy_metrics().map_err(to_js)?.to_array().to_vec())
}

#[wasm_bindgen]
pub fn metric_names(legacy: bool) -> Vec<String> {
    super::metric_names(legacy)
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
