// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! STL reader backed by stl_io

use super::error::{LoadResult, MeshLoadError};
use crate::geometry::Mesh;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use stl_io::read_stl;
use tracing::debug;

pub fn load_stl<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| MeshLoadError::from_open(e, path))?;
    let mesh = parse_stl(&mut file)?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "loaded STL"
    );
    Ok(mesh)
}

/// Read ASCII or binary STL. Identical corner positions are welded by the
/// reader, so shared edges come out shared.
pub fn parse_stl<R: Read + Seek>(reader: &mut R) -> LoadResult<Mesh> {
    let stl = read_stl(reader)
        .map_err(|e| MeshLoadError::invalid_content(format!("failed to read STL: {e}")))?;

    let positions: Vec<[f64; 3]> = stl
        .vertices
        .iter()
        .map(|v| [f64::from(v[0]), f64::from(v[1]), f64::from(v[2])])
        .collect();
    let faces: Vec<[usize; 3]> = stl.faces.iter().map(|f| f.vertices).collect();

    Ok(Mesh::from_rows(&positions, &faces))
}
