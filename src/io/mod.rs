// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! I/O module - reading triangle meshes from disk

mod error;
mod msh;
mod obj;
mod ply;
mod stl;

pub use error::{LoadResult, MeshLoadError};
pub use msh::{load_msh, parse_msh};
pub use obj::{load_obj, parse_obj};
pub use ply::{load_ply, parse_ply};
pub use stl::{load_stl, parse_stl};

use crate::geometry::Mesh;
use std::path::Path;

/// Mesh file formats understood by [`load_mesh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Ply,
    Stl,
    Msh,
}

impl MeshFormat {
    /// Detect the format from a file extension, case-insensitively
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "obj" => Ok(Self::Obj),
            "ply" => Ok(Self::Ply),
            "stl" => Ok(Self::Stl),
            "msh" => Ok(Self::Msh),
            _ => Err(MeshLoadError::UnknownFormat { extension }),
        }
    }
}

/// Load a triangle mesh, choosing the reader by file extension.
///
/// A file without triangles loads as a mesh with zero faces.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    match MeshFormat::from_path(path)? {
        MeshFormat::Obj => load_obj(path),
        MeshFormat::Ply => load_ply(path),
        MeshFormat::Stl => load_stl(path),
        MeshFormat::Msh => load_msh(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            MeshFormat::from_path(Path::new("a/b/Bunny.OBJ")).unwrap(),
            MeshFormat::Obj
        );
        assert_eq!(
            MeshFormat::from_path(Path::new("part.msh")).unwrap(),
            MeshFormat::Msh
        );
        assert!(matches!(
            MeshFormat::from_path(Path::new("mesh.vtu")),
            Err(MeshLoadError::UnknownFormat { extension }) if extension == "vtu"
        ));
        assert!(MeshFormat::from_path(Path::new("noext")).is_err());
    }
}
