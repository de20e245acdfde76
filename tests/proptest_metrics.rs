// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Property-based tests for the metrics engine.
//!
//! Run with: cargo test --test proptest_metrics

use nalgebra::DMatrix;
use proptest::prelude::*;
use trimetric::metrics::{evaluate_triangle, QualityAccumulator};
use trimetric::Mesh;

// =============================================================================
// Strategies
// =============================================================================

fn arb_position() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-100.0..100.0f64)
}

/// Random triangle soup with valid indices (repeated indices allowed)
fn arb_mesh(max_vertices: usize, max_faces: usize) -> impl Strategy<Value = Mesh> {
    (3..=max_vertices).prop_flat_map(move |n| {
        let vertices = prop::collection::vec(arb_position(), n);
        let faces = prop::collection::vec(prop::array::uniform3(0..n), 0..=max_faces);
        (vertices, faces).prop_map(|(v, f)| Mesh::from_rows(&v, &f))
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn counts_are_exact(mesh in arb_mesh(20, 40)) {
        let metrics = mesh.aggregate_metrics().unwrap();
        prop_assert_eq!(metrics.num_f, mesh.triangle_count());
        prop_assert_eq!(metrics.num_v, mesh.vertex_count());
    }

    #[test]
    fn per_triangle_rows_are_bounded(mesh in arb_mesh(20, 40)) {
        let table = mesh.per_triangle_metrics().unwrap();
        prop_assert_eq!(table.len(), mesh.triangle_count());
        for row in table.iter() {
            prop_assert!(row.min_angle >= 0.0 && row.max_angle <= 180.0);
            prop_assert!(row.min_angle <= row.max_angle);
            prop_assert!(row.ratio >= 0.0 && row.ratio <= 1.0 + 1e-9);
            prop_assert!(row.shape >= 0.0 && row.shape <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn relative_edges_fit_in_bounding_box(mesh in arb_mesh(20, 40)) {
        let lengths = mesh.relative_edge_lengths().unwrap();
        let mut sorted = lengths.edges.clone();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), lengths.len());
        for &value in &lengths.values {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&value));
        }
    }

    #[test]
    fn merged_shards_match_single_pass(mesh in arb_mesh(20, 40), split in 0usize..40) {
        let split = split.min(mesh.triangle_count());
        let eval = |f: usize| {
            let [a, b, c] = mesh.face(f);
            evaluate_triangle(&mesh.vertex(a), &mesh.vertex(b), &mesh.vertex(c))
        };

        let mut whole = QualityAccumulator::new();
        let mut left = QualityAccumulator::new();
        let mut right = QualityAccumulator::new();
        for f in 0..mesh.triangle_count() {
            whole.push(&eval(f));
            if f < split { left.push(&eval(f)) } else { right.push(&eval(f)) }
        }
        left.merge(&right);

        prop_assert_eq!(left.min_angle.min, whole.min_angle.min);
        prop_assert_eq!(left.max_angle.max, whole.max_angle.max);
        prop_assert_eq!(left.ratio.count, whole.ratio.count);
        prop_assert_eq!(left.edge.count, whole.edge.count);
        prop_assert_eq!(left.has_zero_area, whole.has_zero_area);
        prop_assert_eq!(left.has_zero_edge, whole.has_zero_edge);
        prop_assert!((left.ratio.sum - whole.ratio.sum).abs() <= 1e-9 * whole.ratio.count.max(1) as f64);
    }

    #[test]
    fn non_triangle_widths_are_rejected(width in 0usize..8, rows in 0usize..4) {
        prop_assume!(width != 3);
        let vertices = DMatrix::<f64>::zeros(4, 3);
        let faces = DMatrix::<usize>::zeros(rows, width);
        prop_assert!(trimetric::compute_aggregate_metrics(&vertices, &faces).is_err());
        prop_assert!(trimetric::compute_per_triangle_metrics(&vertices, &faces).is_err());
        prop_assert!(trimetric::compute_relative_edge_lengths(&vertices, &faces).is_err());
    }
}
