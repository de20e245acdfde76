// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Closed-form triangle math

/// Interior angle opposite side `a`, in degrees, for a triangle with side
/// lengths `a`, `b`, `c`.
///
/// The cosine is clamped to [-1, 1] so that rounding on nearly flat triangles
/// yields 0° or 180° instead of NaN.
pub fn law_of_cosines(a: f64, b: f64, c: f64) -> f64 {
    let x = (b * b + c * c - a * a) / (2.0 * b * c);
    rad_to_deg(x.clamp(-1.0, 1.0).acos())
}

/// Triangle area from its side lengths (Heron's formula).
///
/// Returns the area together with the semi-perimeter. The radicand is clamped
/// at zero because cancellation can push it slightly negative.
pub fn heron_area(a: f64, b: f64, c: f64) -> (f64, f64) {
    let s = (a + b + c) * 0.5;
    let radicand = s * (s - a) * (s - b) * (s - c);
    (radicand.clamp(0.0, f64::INFINITY).sqrt(), s)
}

/// Convert radians to degrees
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}
