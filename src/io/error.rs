// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Error types for mesh loading

use crate::metrics::MetricsError;
use std::path::PathBuf;
use thiserror::Error;

pub type LoadResult<T> = Result<T, MeshLoadError>;

/// Errors raised while reading a mesh file into memory
#[derive(Debug, Error)]
pub enum MeshLoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("unknown mesh format: .{extension}")]
    UnknownFormat { extension: String },

    #[error("invalid file content: {message}")]
    InvalidContent { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// The loaded tables were rejected by the metrics layer
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

impl MeshLoadError {
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Map an open failure, reporting a missing file by path
    pub(crate) fn from_open(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }
}
