// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Persisting a [`ReportBundle`] to disk
//!
//! Each run lands in `<base>/<YYYYmmdd_HH>/`, bucketed by the hour the
//! collection finished. A run with no commits writes only the metadata
//! record.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::bundle::ReportBundle;
use crate::error::ReportError;
use crate::metadata::METADATA_FILE;
use crate::narrative::{commit_file_name, render_commit};
use crate::table::render_csv;

/// Subdirectory holding per-commit narratives
pub const COMMITS_DIR: &str = "commits";

/// Paths of everything written for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenReport {
    /// The hour-bucketed run directory
    pub dir: PathBuf,
    /// CSV export, if any commits were found
    pub table: Option<PathBuf>,
    /// Markdown summary, if any commits were found
    pub summary: Option<PathBuf>,
    /// JSON export with nested detail, if any commits were found
    pub json: Option<PathBuf>,
    /// Per-commit narratives
    pub commit_files: Vec<PathBuf>,
    /// Metadata record
    pub metadata: PathBuf,
}

/// Writes report bundles under a base directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    base_dir: PathBuf,
    individual_files: bool,
}

impl ReportWriter {
    /// Create a writer rooted at `base_dir`
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            individual_files: true,
        }
    }

    /// Enable or disable per-commit narrative files
    #[must_use]
    pub fn with_individual_files(mut self, enabled: bool) -> Self {
        self.individual_files = enabled;
        self
    }

    /// The run directory a bundle will be written to
    #[must_use]
    pub fn run_dir(&self, bundle: &ReportBundle) -> PathBuf {
        self.base_dir
            .join(bundle.collected_at().format("%Y%m%d_%H").to_string())
    }

    /// Write every artifact of `bundle`
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if a directory or file cannot be written.
    pub fn write(&self, bundle: &ReportBundle) -> Result<WrittenReport, ReportError> {
        let dir = self.run_dir(bundle);
        create_dir(&dir)?;

        let org = bundle.window().organization();
        let stamp = bundle.collected_at().format("%H%M").to_string();
        let mut written = WrittenReport {
            dir: dir.clone(),
            ..Default::default()
        };

        if !bundle.is_empty() {
            let table = dir.join(format!("{org}_commits_{stamp}.csv"));
            write_file(&table, &render_csv(&bundle.rows()))?;
            written.table = Some(table);

            let summary = dir.join(format!("{org}_summary_{stamp}.md"));
            write_file(&summary, &bundle.summary())?;
            written.summary = Some(summary);

            let json = dir.join(format!("{org}_commits_{stamp}.json"));
            write_file(&json, &serde_json::to_string_pretty(bundle.commits())?)?;
            written.json = Some(json);

            if self.individual_files {
                written.commit_files = self.write_commit_files(&dir, bundle)?;
            }
        }

        let metadata = dir.join(METADATA_FILE);
        write_file(&metadata, &bundle.metadata().render())?;
        written.metadata = metadata;

        info!(
            dir = %dir.display(),
            commits = bundle.commits().len(),
            commit_files = written.commit_files.len(),
            "Report written"
        );
        Ok(written)
    }

    fn write_commit_files(
        &self,
        dir: &Path,
        bundle: &ReportBundle,
    ) -> Result<Vec<PathBuf>, ReportError> {
        let commits_dir = dir.join(COMMITS_DIR);
        let org = bundle.window().organization();
        let mut paths = Vec::new();

        for commit in bundle.commits() {
            let Some(text) = render_commit(org, commit) else {
                continue;
            };
            if paths.is_empty() {
                create_dir(&commits_dir)?;
            }
            let path = commits_dir.join(commit_file_name(commit));
            write_file(&path, &text)?;
            debug!(path = %path.display(), "Wrote commit narrative");
            paths.push(path);
        }

        Ok(paths)
    }
}

fn create_dir(path: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
