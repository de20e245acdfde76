// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Reference meshes with known quality characteristics

use super::Mesh;
use nalgebra::Vector3;
use std::f64::consts::PI;

/// Generated meshes used by tests, benchmarks and the demo command
pub enum Primitive {
    /// Single equilateral triangle in the XY plane
    Equilateral { side: f64 },
    /// Regular tetrahedron: four equilateral faces
    Tetrahedron { edge: f64 },
    /// Box of 8 shared corners and 12 right triangles
    Cube { size: Vector3<f64>, center: bool },
    /// Planar grid of `nx × ny` quads, each split into two right triangles
    Grid { nx: usize, ny: usize, spacing: f64 },
    /// UV sphere; the north pole row collapses onto one point
    Sphere { r: f64, fn_: u32 },
}

impl Primitive {
    pub fn equilateral(side: f64) -> Self {
        Self::Equilateral { side }
    }

    pub fn tetrahedron(edge: f64) -> Self {
        Self::Tetrahedron { edge }
    }

    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn grid(nx: usize, ny: usize, spacing: f64) -> Self {
        Self::Grid { nx, ny, spacing }
    }

    pub fn sphere(r: f64, fn_: u32) -> Self {
        let segments = if fn_ > 0 { fn_ } else { 32 };
        Self::Sphere { r, fn_: segments }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Equilateral { side } => generate_equilateral_mesh(*side),
            Self::Tetrahedron { edge } => generate_tetrahedron_mesh(*edge),
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Grid { nx, ny, spacing } => generate_grid_mesh(*nx, *ny, *spacing),
            Self::Sphere { r, fn_ } => generate_sphere_mesh(*r, *fn_),
        }
    }
}

fn generate_equilateral_mesh(side: f64) -> Mesh {
    let height = side * 3.0_f64.sqrt() / 2.0;
    Mesh::from_rows(
        &[[0.0, 0.0, 0.0], [side, 0.0, 0.0], [side / 2.0, height, 0.0]],
        &[[0, 1, 2]],
    )
}

fn generate_tetrahedron_mesh(edge: f64) -> Mesh {
    // Alternate corners of a cube with side edge/√2
    let h = edge / (2.0 * 2.0_f64.sqrt());
    Mesh::from_rows(
        &[[h, h, h], [h, -h, -h], [-h, h, -h], [-h, -h, h]],
        &[[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
    )
}

fn generate_cube_mesh(size: Vector3<f64>, center: bool) -> Mesh {
    let (min, max) = if center {
        (-size / 2.0, size / 2.0)
    } else {
        (Vector3::zeros(), size)
    };

    let positions = [
        [min.x, min.y, min.z],
        [max.x, min.y, min.z],
        [max.x, max.y, min.z],
        [min.x, max.y, min.z],
        [min.x, min.y, max.z],
        [max.x, min.y, max.z],
        [max.x, max.y, max.z],
        [min.x, max.y, max.z],
    ];

    let faces = [
        // Front (z+)
        [4, 5, 6],
        [4, 6, 7],
        // Back (z-)
        [1, 0, 3],
        [1, 3, 2],
        // Right (x+)
        [5, 1, 2],
        [5, 2, 6],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Top (y+)
        [7, 6, 2],
        [7, 2, 3],
        // Bottom (y-)
        [0, 1, 5],
        [0, 5, 4],
    ];

    Mesh::from_rows(&positions, &faces)
}

fn generate_grid_mesh(nx: usize, ny: usize, spacing: f64) -> Mesh {
    let mut positions = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            positions.push([i as f64 * spacing, j as f64 * spacing, 0.0]);
        }
    }

    let mut faces = Vec::with_capacity(2 * nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let first = j * (nx + 1) + i;
            let above = first + nx + 1;
            faces.push([first, first + 1, above + 1]);
            faces.push([first, above + 1, above]);
        }
    }

    Mesh::from_rows(&positions, &faces)
}

fn generate_sphere_mesh(radius: f64, segments: u32) -> Mesh {
    let stacks = segments as usize;
    let slices = segments as usize;

    let mut positions = Vec::with_capacity((stacks + 1) * (slices + 1));
    for i in 0..=stacks {
        let phi = PI * i as f64 / stacks as f64;
        let y = radius * phi.cos();
        let r = radius * phi.sin();

        for j in 0..=slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            positions.push([r * theta.cos(), y, r * theta.sin()]);
        }
    }

    let mut faces = Vec::with_capacity(2 * stacks * slices);
    for i in 0..stacks {
        for j in 0..slices {
            let first = i * (slices + 1) + j;
            let second = first + slices + 1;
            faces.push([first, second, first + 1]);
            faces.push([second, second + 1, first + 1]);
        }
    }

    Mesh::from_rows(&positions, &faces)
}
