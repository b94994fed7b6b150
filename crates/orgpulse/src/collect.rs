// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Organization-wide commit collection
//!
//! [`Collector`] walks organization -> repositories -> branches -> commits
//! strictly in enumeration order, one request at a time, feeding every
//! observation into a [`DedupAggregator`].
//!
//! Failures are isolated to the smallest scope that produced them: a
//! repository whose branches cannot be listed contributes nothing, a branch
//! whose listing breaks contributes what was fetched before the break, and a
//! commit whose detail cannot be fetched is kept without detail. Only the
//! membership and repository listings, which have no enclosing scope, abort
//! the run.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use orgpulse::collect::{CollectOptions, Collector};
//! use orgpulse_github::{GithubClient, RunWindow};
//!
//! let client = GithubClient::new("ghp_example");
//! let window = RunWindow::last_hours("acme", Utc::now(), 1);
//! let collection = Collector::new(&client, CollectOptions::default())
//!     .collect(&window)
//!     .expect("collect");
//! println!("{} unique commits", collection.commits.len());
//! ```

use std::collections::HashSet;

use orgpulse_github::{
    CommitDetail, CommitQuery, CommitSummary, GithubError, Identity, OrgApi, RunWindow,
    UniqueCommit,
};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::aggregate::{DedupAggregator, Observation};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that abort a collection run
#[derive(Debug, Error)]
pub enum CollectError {
    /// The organization member list could not be fetched
    #[error("Failed to list organization members: {0}")]
    Members(#[source] GithubError),

    /// The organization repository list could not be fetched
    #[error("Failed to list organization repositories: {0}")]
    Repositories(#[source] GithubError),
}

// ============================================================================
// Options and Statistics
// ============================================================================

/// Options for a collection run
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Only keep commits authored by organization members
    pub members_only: bool,
    /// Fetch per-file detail for each unique commit
    pub include_details: bool,
    /// Restrict traversal to these repositories (empty = all)
    pub repositories: Vec<String>,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            members_only: true,
            include_details: true,
            repositories: Vec::new(),
        }
    }
}

impl CollectOptions {
    /// Accept commits from any author
    #[must_use]
    pub fn all_users(mut self) -> Self {
        self.members_only = false;
        self
    }

    /// Skip per-commit detail fetches
    #[must_use]
    pub fn without_details(mut self) -> Self {
        self.include_details = false;
        self
    }

    /// Only visit the named repositories
    #[must_use]
    pub fn only_repositories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.repositories = names.into_iter().map(Into::into).collect();
        self
    }

    fn wants_repository(&self, repo: &str) -> bool {
        self.repositories.is_empty() || self.repositories.iter().any(|r| r == repo)
    }
}

/// Counters from a collection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Repositories visited
    pub repositories: usize,
    /// Branches visited
    pub branches: usize,
    /// Commit observations across all branches, before deduplication
    pub observations: usize,
    /// Unique commits
    pub unique_commits: usize,
    /// Unique commits seen on more than one branch
    pub multi_branch_commits: usize,
    /// Detail requests issued
    pub detail_fetches: usize,
    /// Detail requests that failed
    pub detail_failures: usize,
    /// Repository or branch scopes that failed
    pub failed_scopes: usize,
}

/// The outcome of a collection run
#[derive(Debug, Clone)]
pub struct Collection {
    /// Unique commits, newest first
    pub commits: Vec<UniqueCommit>,
    /// Run counters
    pub stats: CollectStats,
}

// ============================================================================
// Collector
// ============================================================================

/// Traverses an organization and deduplicates its commits
pub struct Collector<'a, A> {
    api: &'a A,
    options: CollectOptions,
}

impl<'a, A: OrgApi> Collector<'a, A> {
    /// Create a collector over `api`
    #[must_use]
    pub fn new(api: &'a A, options: CollectOptions) -> Self {
        Self { api, options }
    }

    /// Collect every unique commit in `window`
    ///
    /// # Errors
    ///
    /// Returns `CollectError` if the member or repository listing fails.
    /// Failures below the repository level are logged and skipped.
    pub fn collect(&self, window: &RunWindow) -> Result<Collection, CollectError> {
        let org = window.organization();

        let members = self.resolve_members(org)?;
        let mut query = CommitQuery::all().within(window);
        if let Some(ref members) = members {
            query = query.members_only(members);
        }

        let repos: Vec<String> = self
            .api
            .repositories(org)
            .map_err(CollectError::Repositories)?
            .into_iter()
            .filter(|repo| self.options.wants_repository(repo))
            .collect();
        info!(org = %org, count = repos.len(), "Found repositories");

        let mut aggregator = DedupAggregator::new();
        let mut stats = CollectStats::default();

        for repo in &repos {
            self.collect_repository(org, repo, &query, &mut aggregator, &mut stats);
        }

        stats.unique_commits = aggregator.len();
        stats.multi_branch_commits = aggregator.multi_branch_count();
        info!(
            repositories = stats.repositories,
            branches = stats.branches,
            observations = stats.observations,
            unique = stats.unique_commits,
            multi_branch = stats.multi_branch_commits,
            detail_fetches = stats.detail_fetches,
            detail_failures = stats.detail_failures,
            failed_scopes = stats.failed_scopes,
            "Collection complete"
        );

        Ok(Collection {
            commits: aggregator.export(),
            stats,
        })
    }

    fn resolve_members(&self, org: &str) -> Result<Option<HashSet<Identity>>, CollectError> {
        if !self.options.members_only {
            return Ok(None);
        }
        let members = self.api.members(org).map_err(CollectError::Members)?;
        info!(org = %org, count = members.len(), "Resolved organization members");
        Ok(Some(members))
    }

    fn collect_repository(
        &self,
        org: &str,
        repo: &str,
        query: &CommitQuery<'_>,
        aggregator: &mut DedupAggregator,
        stats: &mut CollectStats,
    ) {
        stats.repositories += 1;

        let branches = match self.api.branches(org, repo) {
            Ok(branches) => branches,
            Err(e) => {
                error!(repo = %repo, error = %e, "Failed to list branches, skipping repository");
                stats.failed_scopes += 1;
                return;
            }
        };
        info!(repo = %repo, count = branches.len(), "Processing repository");

        for branch in &branches {
            stats.branches += 1;

            let commits = match self.api.commits(org, repo, branch, query) {
                Ok(commits) => commits,
                Err(e) => {
                    error!(
                        repo = %repo,
                        branch = %branch,
                        kept = e.partial.len(),
                        error = %e.source,
                        "Failed to list commits, keeping partial results"
                    );
                    stats.failed_scopes += 1;
                    e.partial
                }
            };
            debug!(repo = %repo, branch = %branch, count = commits.len(), "Branch commits");

            for summary in commits {
                stats.observations += 1;
                let seen = aggregator.observe_with(summary, |s| self.fetch_detail(org, s, stats));
                if seen == Observation::NewBranch {
                    debug!(repo = %repo, branch = %branch, "Commit already seen on another branch");
                }
            }
        }
    }

    fn fetch_detail(
        &self,
        org: &str,
        summary: &CommitSummary,
        stats: &mut CollectStats,
    ) -> Option<CommitDetail> {
        if !self.options.include_details {
            return None;
        }
        stats.detail_fetches += 1;
        debug!(repo = %summary.repo, sha = %summary.short_sha(), "Fetching commit detail");

        match self.api.commit_detail(org, &summary.repo, &summary.sha) {
            Ok(detail) => Some(detail),
            Err(e) => {
                error!(
                    repo = %summary.repo,
                    sha = %summary.short_sha(),
                    error = %e,
                    "Commit detail unavailable"
                );
                stats.detail_failures += 1;
                None
            }
        }
    }
}
