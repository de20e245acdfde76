// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! CLI subsystem: console reporting and batch evaluation

pub mod batch;
pub mod reporter;

pub use batch::{discover_meshes, evaluate_batch, BatchFailure, BatchReport, BatchRow};
pub use reporter::Reporter;
