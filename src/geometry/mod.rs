// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Geometry module - mesh representation and test primitives

mod bbox;
mod mesh;
mod primitives;

pub use bbox::BoundingBox;
pub use mesh::Mesh;
pub use primitives::Primitive;
