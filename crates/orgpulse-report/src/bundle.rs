// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The in-memory artifacts of one collection run

use std::time::Duration;

use chrono::{DateTime, Utc};
use orgpulse_github::{RunWindow, UniqueCommit};

use crate::metadata::RunMetadata;
use crate::summary::render_summary;
use crate::table::CommitRow;

/// Everything produced for one [`RunWindow`]
#[derive(Debug, Clone)]
pub struct ReportBundle {
    window: RunWindow,
    commits: Vec<UniqueCommit>,
    collected_at: DateTime<Utc>,
    elapsed: Duration,
}

impl ReportBundle {
    /// Build a bundle; `commits` are reordered newest first
    #[must_use]
    pub fn new(
        window: RunWindow,
        mut commits: Vec<UniqueCommit>,
        collected_at: DateTime<Utc>,
        elapsed: Duration,
    ) -> Self {
        commits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self {
            window,
            commits,
            collected_at,
            elapsed,
        }
    }

    /// The window this bundle covers
    #[must_use]
    pub fn window(&self) -> &RunWindow {
        &self.window
    }

    /// Unique commits, newest first
    #[must_use]
    pub fn commits(&self) -> &[UniqueCommit] {
        &self.commits
    }

    /// Wall-clock time the collection finished
    #[must_use]
    pub fn collected_at(&self) -> DateTime<Utc> {
        self.collected_at
    }

    /// Whether no commits were found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// One flat row per commit
    #[must_use]
    pub fn rows(&self) -> Vec<CommitRow> {
        self.commits.iter().map(CommitRow::from).collect()
    }

    /// Markdown summary grouped by repository and author
    #[must_use]
    pub fn summary(&self) -> String {
        render_summary(&self.window, &self.commits)
    }

    /// The metadata record
    #[must_use]
    pub fn metadata(&self) -> RunMetadata {
        RunMetadata {
            organization: self.window.organization().to_string(),
            since: self.window.since(),
            until: self.window.until(),
            total_commits: self.commits.len(),
            collected_at: self.collected_at,
            elapsed: self.elapsed,
        }
    }
}
