// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! PLY reader (ASCII and binary) backed by ply-rs

use super::error::{LoadResult, MeshLoadError};
use crate::geometry::Mesh;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

pub fn load_ply<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshLoadError::from_open(e, path))?;
    let mesh = parse_ply(&mut BufReader::new(file))?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "loaded PLY"
    );
    Ok(mesh)
}

/// Read `vertex` x/y/z and face `vertex_indices` (or `vertex_index`) lists.
///
/// Polygons are fan-triangulated. Faces with an index past the vertex list
/// are rejected.
pub fn parse_ply<R: BufRead>(reader: &mut R) -> LoadResult<Mesh> {
    let parser = Parser::<DefaultElement>::new();
    let header = parser
        .read_header(reader)
        .map_err(|e| MeshLoadError::invalid_content(format!("failed to parse PLY header: {e}")))?;
    let payload = parser
        .read_payload(reader, &header)
        .map_err(|e| MeshLoadError::invalid_content(format!("failed to read PLY payload: {e}")))?;

    let mut positions = Vec::new();
    if let Some(elements) = payload.get("vertex") {
        positions.reserve(elements.len());
        for element in elements {
            let mut coords = [0.0; 3];
            for (coord, key) in coords.iter_mut().zip(["x", "y", "z"]) {
                *coord = float_property(element, key).ok_or_else(|| {
                    MeshLoadError::invalid_content(format!("vertex without numeric '{key}'"))
                })?;
            }
            positions.push(coords);
        }
    }

    let mut faces = Vec::new();
    if let Some(elements) = payload.get("face") {
        faces.reserve(elements.len());
        for element in elements {
            let indices = index_list(element)?;
            if let Some(&bad) = indices.iter().find(|&&i| i >= positions.len()) {
                return Err(MeshLoadError::invalid_content(format!(
                    "face index {bad} out of range ({} vertices)",
                    positions.len()
                )));
            }
            if indices.len() >= 3 {
                for i in 1..indices.len() - 1 {
                    faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
        }
    }

    Ok(Mesh::from_rows(&positions, &faces))
}

fn float_property(element: &DefaultElement, key: &str) -> Option<f64> {
    match element.get(key)? {
        Property::Float(v) => Some(f64::from(*v)),
        Property::Double(v) => Some(*v),
        _ => None,
    }
}

fn index_list(element: &DefaultElement) -> LoadResult<Vec<usize>> {
    fn unsigned<T: Copy + TryInto<usize>>(values: &[T]) -> LoadResult<Vec<usize>> {
        values
            .iter()
            .map(|&v| {
                v.try_into()
                    .map_err(|_| MeshLoadError::invalid_content("negative face index"))
            })
            .collect()
    }

    for key in ["vertex_indices", "vertex_index"] {
        if let Some(prop) = element.get(key) {
            return match prop {
                Property::ListChar(v) => unsigned(v),
                Property::ListUChar(v) => unsigned(v),
                Property::ListShort(v) => unsigned(v),
                Property::ListUShort(v) => unsigned(v),
                Property::ListInt(v) => unsigned(v),
                Property::ListUInt(v) => unsigned(v),
                _ => Err(MeshLoadError::invalid_content(format!(
                    "face property '{key}' is not an integer list"
                ))),
            };
        }
    }
    Err(MeshLoadError::invalid_content("face without vertex index list"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD: &str = "ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
1 1 0
0 1 0
4 0 1 2 3
";

    #[test]
    fn test_ascii_quad() {
        let mesh = parse_ply(&mut Cursor::new(QUAD)).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.face(0), [0, 1, 2]);
        assert_eq!(mesh.face(1), [0, 2, 3]);
    }

    #[test]
    fn test_index_out_of_range() {
        let src = QUAD.replace("4 0 1 2 3", "3 0 1 9");
        assert!(matches!(
            parse_ply(&mut Cursor::new(src)),
            Err(MeshLoadError::InvalidContent { .. })
        ));
    }

    #[test]
    fn test_not_ply() {
        assert!(parse_ply(&mut Cursor::new("solid nothing\n")).is_err());
    }
}
