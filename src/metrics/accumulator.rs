// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Running min/max/sum reductions over triangles

use super::aggregate::{AggregateMetrics, LegacyMetrics};
use super::triangle::TriangleEvaluation;
use serde::{Deserialize, Serialize};

/// Running minimum, maximum and sum of a non-negative quantity.
///
/// The identity is `min = +inf`, `max = 0`, `sum = 0`, so an untouched
/// statistic reports `+inf` as its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunningStat {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: usize,
}

impl RunningStat {
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: 0.0,
            sum: 0.0,
            count: 0,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    pub fn merge(&mut self, other: &RunningStat) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Sum divided by `divisor`, or 0 when the divisor is 0
    pub fn mean_over(&self, divisor: usize) -> f64 {
        if divisor == 0 {
            0.0
        } else {
            self.sum / divisor as f64
        }
    }

    /// `(min, max, sum)` scaled by `1 / length`, left untouched if nothing was pushed
    fn normalized(&self, length: f64) -> Self {
        if self.count == 0 {
            return *self;
        }
        Self {
            min: self.min / length,
            max: self.max / length,
            sum: self.sum / length,
            count: self.count,
        }
    }
}

impl Default for RunningStat {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-mesh reduction state.
///
/// Triangles can be pushed in any order, and two accumulators built over
/// disjoint triangle ranges can be merged; the result is the same as a single
/// pass over all triangles (up to floating-point summation order).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityAccumulator {
    /// Per-triangle minimum angle
    pub min_angle: RunningStat,
    /// Per-triangle maximum angle
    pub max_angle: RunningStat,
    /// All three angles of every triangle, pooled
    pub angle: RunningStat,
    pub ratio: RunningStat,
    pub shape: RunningStat,
    /// All three edges of every regular triangle, pooled
    pub edge: RunningStat,
    pub has_zero_area: bool,
    pub has_zero_edge: bool,
}

impl QualityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one triangle into the reductions.
    ///
    /// Zero-edge triangles only raise the flag. Zero-area triangles raise
    /// their flag and still contribute angles. Edge lengths are only taken
    /// from regular triangles.
    pub fn push(&mut self, eval: &TriangleEvaluation) {
        match eval {
            TriangleEvaluation::ZeroEdge => {
                self.has_zero_edge = true;
            }
            TriangleEvaluation::ZeroArea { angles, .. } => {
                self.push_angles(angles);
                self.has_zero_area = true;
            }
            TriangleEvaluation::Regular {
                edges,
                angles,
                radius_ratio,
                shape_quality,
                ..
            } => {
                self.push_angles(angles);
                self.ratio.push(*radius_ratio);
                self.shape.push(*shape_quality);
                for &length in edges {
                    self.edge.push(length);
                }
            }
        }
    }

    fn push_angles(&mut self, angles: &[f64; 3]) {
        let [a, b, c] = *angles;
        self.min_angle.push(a.min(b).min(c));
        self.max_angle.push(a.max(b).max(c));
        for &angle in angles {
            self.angle.push(angle);
        }
    }

    pub fn merge(&mut self, other: &QualityAccumulator) {
        self.min_angle.merge(&other.min_angle);
        self.max_angle.merge(&other.max_angle);
        self.angle.merge(&other.angle);
        self.ratio.merge(&other.ratio);
        self.shape.merge(&other.shape);
        self.edge.merge(&other.edge);
        self.has_zero_area |= other.has_zero_area;
        self.has_zero_edge |= other.has_zero_edge;
    }

    /// Produce the 19-field statistics.
    ///
    /// Means divide by the full triangle count `num_f`, degenerate triangles
    /// included. Edge statistics are divided by the bounding-box diagonal.
    pub fn finish(&self, num_f: usize, num_v: usize, diagonal: f64) -> AggregateMetrics {
        let edge = self.edge.normalized(diagonal);
        AggregateMetrics {
            min_min_angle: self.min_angle.min,
            max_min_angle: self.min_angle.max,
            avg_min_angle: self.min_angle.mean_over(num_f),
            min_max_angle: self.max_angle.min,
            max_max_angle: self.max_angle.max,
            avg_max_angle: self.max_angle.mean_over(num_f),
            min_ratio: self.ratio.min,
            max_ratio: self.ratio.max,
            avg_ratio: self.ratio.mean_over(num_f),
            min_shape: self.shape.min,
            max_shape: self.shape.max,
            avg_shape: self.shape.mean_over(num_f),
            min_edge: edge.min,
            max_edge: edge.max,
            avg_edge: edge.mean_over(3 * num_f),
            num_f,
            num_v,
            has_zero_area: self.has_zero_area,
            has_zero_edge: self.has_zero_edge,
        }
    }

    /// Produce the 16-field statistics with pooled angles.
    pub fn finish_legacy(&self, num_f: usize, num_v: usize, diagonal: f64) -> LegacyMetrics {
        let edge = self.edge.normalized(diagonal);
        LegacyMetrics {
            min_angle: self.angle.min,
            max_angle: self.angle.max,
            avg_angle: self.angle.mean_over(3 * num_f),
            min_ratio: self.ratio.min,
            max_ratio: self.ratio.max,
            avg_ratio: self.ratio.mean_over(num_f),
            min_shape: self.shape.min,
            max_shape: self.shape.max,
            avg_shape: self.shape.mean_over(num_f),
            min_edge: edge.min,
            max_edge: edge.max,
            avg_edge: edge.mean_over(3 * num_f),
            num_f,
            num_v,
            has_zero_area: self.has_zero_area,
            has_zero_edge: self.has_zero_edge,
        }
    }
}
