// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for orgpulse-report

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while persisting a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// Error writing a report file or directory
    #[error("IO error at {path}: {source}")]
    Io {
        /// The file or directory being written
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// Error serializing the JSON artifact
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
