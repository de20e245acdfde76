// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Wavefront OBJ reader (positions and faces only)

use super::error::{LoadResult, MeshLoadError};
use crate::geometry::Mesh;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Load an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshLoadError::from_open(e, path))?;
    let mesh = parse_obj(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "loaded OBJ"
    );
    Ok(mesh)
}

/// Parse OBJ text.
///
/// Only `v` and `f` records are read. Face corners may be written as `i`,
/// `i/t`, `i//n` or `i/t/n`; negative indices count back from the last vertex
/// read so far. Polygons are fan-triangulated.
pub fn parse_obj<R: BufRead>(reader: R) -> LoadResult<Mesh> {
    let mut positions: Vec<[f64; 3]> = Vec::new();
    let mut faces: Vec<[usize; 3]> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let mut coords = [0.0; 3];
                for coord in &mut coords {
                    let token = tokens.next().ok_or_else(|| {
                        MeshLoadError::invalid_content(format!(
                            "line {}: vertex needs three coordinates",
                            line_no + 1
                        ))
                    })?;
                    *coord = token.parse()?;
                }
                positions.push(coords);
            }
            Some("f") => {
                let corners = tokens
                    .map(|token| resolve_index(token, positions.len(), line_no + 1))
                    .collect::<LoadResult<Vec<usize>>>()?;
                if corners.len() < 3 {
                    return Err(MeshLoadError::invalid_content(format!(
                        "line {}: face needs at least three corners",
                        line_no + 1
                    )));
                }
                for i in 1..corners.len() - 1 {
                    faces.push([corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    Ok(Mesh::from_rows(&positions, &faces))
}

/// Turn one face corner token into a zero-based vertex index
fn resolve_index(token: &str, vertex_count: usize, line: usize) -> LoadResult<usize> {
    let position = token.split('/').next().unwrap_or(token);
    let index: i64 = position.parse()?;

    let resolved = match index {
        0 => None,
        i if i > 0 => Some(i as usize - 1),
        i => vertex_count.checked_sub(i.unsigned_abs() as usize),
    };

    match resolved {
        Some(i) if i < vertex_count => Ok(i),
        _ => Err(MeshLoadError::invalid_content(format!(
            "line {}: vertex index {} out of range ({} vertices)",
            line, index, vertex_count
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_triangle() {
        let src = "# comment\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = parse_obj(Cursor::new(src)).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.face(0), [0, 1, 2]);
    }

    #[test]
    fn test_slash_forms_and_negative_indices() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\n\
                   f 1/1 2//1 3/1/1\nf -4 -2 -1\n";
        let mesh = parse_obj(Cursor::new(src)).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.face(0), [0, 1, 2]);
        assert_eq!(mesh.face(1), [0, 2, 3]);
    }

    #[test]
    fn test_quad_is_fanned() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = parse_obj(Cursor::new(src)).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.face(1), [0, 2, 3]);
    }

    #[test]
    fn test_rejects_bad_records() {
        assert!(matches!(
            parse_obj(Cursor::new("v 0 0\n")),
            Err(MeshLoadError::InvalidContent { .. })
        ));
        assert!(matches!(
            parse_obj(Cursor::new("v 0 0 0\nf 1 2 3\n")),
            Err(MeshLoadError::InvalidContent { .. })
        ));
        assert!(matches!(
            parse_obj(Cursor::new("v 0 zero 0\n")),
            Err(MeshLoadError::ParseFloat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_obj("/nonexistent/mesh.obj"),
            Err(MeshLoadError::FileNotFound { .. })
        ));
    }
}
