// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! orgpulse-report: Commit reports for orgpulse
//!
//! This library crate renders a deduplicated, time-ordered commit set into
//! a CSV export, a Markdown summary, per-commit Markdown narratives, a JSON
//! export and a plain-text metadata record.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use chrono::Utc;
//! use orgpulse_github::RunWindow;
//! use orgpulse_report::{ReportBundle, ReportWriter};
//!
//! let window = RunWindow::last_hours("acme", Utc::now(), 1);
//! let bundle = ReportBundle::new(window, Vec::new(), Utc::now(), Duration::ZERO);
//! let written = ReportWriter::new("hourly_reports").write(&bundle).unwrap();
//! println!("metadata at {}", written.metadata.display());
//! ```

pub mod bundle;
pub mod error;
pub mod metadata;
pub mod narrative;
pub mod summary;
pub mod table;
pub mod writer;

pub use bundle::ReportBundle;
pub use error::ReportError;
pub use metadata::RunMetadata;
pub use table::CommitRow;
pub use writer::{ReportWriter, WrittenReport};
