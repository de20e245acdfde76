// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Single-triangle evaluator shared by every metric path

use crate::utils::{heron_area, law_of_cosines};
use nalgebra::Point3;

/// Geometry of one triangle, classified by how degenerate it is.
///
/// Edge lengths are `[|v1 - v0|, |v2 - v1|, |v0 - v2|]`; `angles[i]` is the
/// interior angle (degrees) opposite `edges[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangleEvaluation {
    /// At least one edge has length exactly zero. Nothing else is computed.
    ZeroEdge,
    /// All edges are non-zero but Heron's formula gives zero area.
    ZeroArea { edges: [f64; 3], angles: [f64; 3] },
    /// A proper triangle.
    Regular {
        edges: [f64; 3],
        angles: [f64; 3],
        /// `2 r / R`, 1 for an equilateral triangle
        radius_ratio: f64,
        /// `4√3 A / (a² + b² + c²)`, 1 for an equilateral triangle
        shape_quality: f64,
    },
}

impl TriangleEvaluation {
    pub fn is_zero_edge(&self) -> bool {
        matches!(self, Self::ZeroEdge)
    }

    pub fn is_zero_area(&self) -> bool {
        matches!(self, Self::ZeroArea { .. })
    }

    /// Interior angles, unless an edge collapsed
    pub fn angles(&self) -> Option<[f64; 3]> {
        match self {
            Self::ZeroEdge => None,
            Self::ZeroArea { angles, .. } | Self::Regular { angles, .. } => Some(*angles),
        }
    }

    pub fn min_angle(&self) -> Option<f64> {
        self.angles().map(|[a, b, c]| a.min(b).min(c))
    }

    pub fn max_angle(&self) -> Option<f64> {
        self.angles().map(|[a, b, c]| a.max(b).max(c))
    }

    /// Edge lengths, unless an edge collapsed
    pub fn edges(&self) -> Option<[f64; 3]> {
        match self {
            Self::ZeroEdge => None,
            Self::ZeroArea { edges, .. } | Self::Regular { edges, .. } => Some(*edges),
        }
    }

    pub fn radius_ratio(&self) -> Option<f64> {
        match self {
            Self::Regular { radius_ratio, .. } => Some(*radius_ratio),
            _ => None,
        }
    }

    pub fn shape_quality(&self) -> Option<f64> {
        match self {
            Self::Regular { shape_quality, .. } => Some(*shape_quality),
            _ => None,
        }
    }
}

/// Evaluate the triangle `(v0, v1, v2)`.
pub fn evaluate_triangle(
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
) -> TriangleEvaluation {
    let a = (v1 - v0).norm();
    let b = (v2 - v1).norm();
    let c = (v0 - v2).norm();

    if a == 0.0 || b == 0.0 || c == 0.0 {
        return TriangleEvaluation::ZeroEdge;
    }

    let edges = [a, b, c];
    let angles = [
        law_of_cosines(a, b, c),
        law_of_cosines(b, a, c),
        law_of_cosines(c, a, b),
    ];

    let (area, s) = heron_area(a, b, c);
    if area == 0.0 || s == 0.0 {
        return TriangleEvaluation::ZeroArea { edges, angles };
    }

    let inradius = area / s;
    let circumradius = (a * b * c) / (4.0 * area);
    let radius_ratio = 2.0 * inradius / circumradius;
    let shape_quality = (4.0 * 3.0_f64.sqrt() * area) / (a * a + b * b + c * c);

    TriangleEvaluation::Regular {
        edges,
        angles,
        radius_ratio,
        shape_quality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equilateral_is_ideal() {
        let h = 3.0_f64.sqrt() / 2.0;
        let eval = evaluate_triangle(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.5, h, 0.0),
        );

        for angle in eval.angles().unwrap() {
            assert_relative_eq!(angle, 60.0, epsilon = 1e-9);
        }
        assert_relative_eq!(eval.radius_ratio().unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(eval.shape_quality().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_right_triangle_angles() {
        let eval = evaluate_triangle(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );

        // a = 1 (v0v1), b = √2 (v1v2), c = 1 (v2v0)
        let [a, b, c] = eval.edges().unwrap();
        assert_eq!(a, 1.0);
        assert_relative_eq!(b, 2.0_f64.sqrt());
        assert_eq!(c, 1.0);

        let angles = eval.angles().unwrap();
        assert_relative_eq!(angles[0], 45.0, epsilon = 1e-9);
        assert_relative_eq!(angles[1], 90.0, epsilon = 1e-9);
        assert_relative_eq!(angles[2], 45.0, epsilon = 1e-9);
        assert_relative_eq!(eval.min_angle().unwrap(), 45.0, epsilon = 1e-9);
        assert_relative_eq!(eval.max_angle().unwrap(), 90.0, epsilon = 1e-9);

        // r = (2 - √2) / 2, R = √2 / 2
        assert_relative_eq!(
            eval.radius_ratio().unwrap(),
            2.0 * 2.0_f64.sqrt() - 2.0,
            epsilon = 1e-12
        );
        // 4√3 · ½ / 4
        assert_relative_eq!(
            eval.shape_quality().unwrap(),
            3.0_f64.sqrt() / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_coincident_vertices() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let eval = evaluate_triangle(&p, &p, &Point3::new(0.0, 0.0, 0.0));
        assert!(eval.is_zero_edge());
        assert_eq!(eval.angles(), None);
        assert_eq!(eval.edges(), None);
    }

    #[test]
    fn test_collinear_vertices() {
        let eval = evaluate_triangle(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(2.0, 0.0, 0.0),
        );
        assert!(eval.is_zero_area());
        assert_eq!(eval.min_angle(), Some(0.0));
        assert_eq!(eval.max_angle(), Some(180.0));
        assert_eq!(eval.radius_ratio(), None);
        assert_eq!(eval.shape_quality(), None);
    }
}
