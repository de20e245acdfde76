// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Shared numeric helpers

pub mod math;
pub mod serde_float;

pub use math::{heron_area, law_of_cosines, rad_to_deg};
