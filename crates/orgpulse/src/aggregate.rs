// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Cross-branch commit deduplication
//!
//! The same commit is usually listed on several branches. [`DedupAggregator`]
//! folds every `(branch, summary)` observation into one [`UniqueCommit`] per
//! SHA and records the branches in order of first appearance. Mutation goes
//! through `&mut self`, so whoever owns the aggregator is its only writer.

use std::collections::HashMap;

use orgpulse_github::{CommitDetail, CommitSummary, UniqueCommit};
use tracing::warn;

/// What an observation changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// First sighting of this SHA
    New,
    /// Known SHA seen on a branch not recorded before
    NewBranch,
    /// Known SHA on an already recorded branch
    Duplicate,
}

/// Accumulates unique commits across a traversal
#[derive(Debug, Default)]
pub struct DedupAggregator {
    commits: Vec<UniqueCommit>,
    index: HashMap<String, usize>,
}

impl DedupAggregator {
    /// Create an empty aggregator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation without fetching detail
    pub fn observe(&mut self, summary: CommitSummary) -> Observation {
        self.observe_with(summary, |_| None)
    }

    /// Record one observation, calling `fetch_detail` only on first sight
    ///
    /// `fetch_detail` runs at most once per SHA for the lifetime of the
    /// aggregator; a `None` result leaves the commit without detail.
    pub fn observe_with<F>(&mut self, summary: CommitSummary, fetch_detail: F) -> Observation
    where
        F: FnOnce(&CommitSummary) -> Option<CommitDetail>,
    {
        if let Some(&slot) = self.index.get(&summary.sha) {
            return if self.commits[slot].observe_branch(&summary.branch) {
                Observation::NewBranch
            } else {
                Observation::Duplicate
            };
        }

        let detail = fetch_detail(&summary);
        let mut unique = UniqueCommit::from_summary(summary);
        if let Some(detail) = detail
            && !unique.attach_detail(detail)
        {
            warn!(sha = %unique.short_sha(), "Discarding detail fetched for a different commit");
        }

        self.index.insert(unique.sha.clone(), self.commits.len());
        self.commits.push(unique);
        Observation::New
    }

    /// Look up a commit by SHA
    #[must_use]
    pub fn get(&self, sha: &str) -> Option<&UniqueCommit> {
        self.index.get(sha).map(|&slot| &self.commits[slot])
    }

    /// Number of unique commits
    #[must_use]
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether nothing has been observed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Number of commits seen on more than one branch
    #[must_use]
    pub fn multi_branch_count(&self) -> usize {
        self.commits.iter().filter(|c| c.branches.len() > 1).count()
    }

    /// Consume the aggregator, returning commits newest first
    ///
    /// Commits with equal timestamps keep their first-seen order.
    #[must_use]
    pub fn export(self) -> Vec<UniqueCommit> {
        let mut commits = self.commits;
        commits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        commits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use orgpulse_github::CommitStats;
    use similar_asserts::assert_eq;

    fn summary(sha: &str, branch: &str, minute: u32) -> CommitSummary {
        CommitSummary {
            sha: sha.to_string(),
            repo: "svc".to_string(),
            branch: branch.to_string(),
            message: format!("commit {sha}"),
            author: "Alice".to_string(),
            author_login: Some("alice".to_string()),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 8, minute, 0).unwrap(),
            permalink: format!("https://github.com/acme/svc/commit/{sha}"),
        }
    }

    fn detail(sha: &str) -> CommitDetail {
        CommitDetail {
            sha: sha.to_string(),
            stats: CommitStats::default(),
            files: vec![],
        }
    }

    #[test]
    fn test_first_sight_inserts() {
        let mut agg = DedupAggregator::new();
        assert_eq!(agg.observe(summary("a", "main", 1)), Observation::New);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.get("a").map(|c| c.branches.clone()), Some(vec!["main".to_string()]));
    }

    #[test]
    fn test_same_sha_on_other_branch_appends() {
        let mut agg = DedupAggregator::new();
        agg.observe(summary("a", "main", 1));
        assert_eq!(agg.observe(summary("a", "dev", 1)), Observation::NewBranch);
        assert_eq!(agg.observe(summary("a", "main", 1)), Observation::Duplicate);

        assert_eq!(agg.len(), 1);
        assert_eq!(agg.multi_branch_count(), 1);
        let commit = agg.get("a").expect("present");
        assert_eq!(commit.branches, vec!["main".to_string(), "dev".to_string()]);
    }

    #[test]
    fn test_detail_fetched_once_per_sha() {
        let mut agg = DedupAggregator::new();
        let mut calls = 0;
        for branch in ["main", "dev", "release", "main"] {
            agg.observe_with(summary("a", branch, 1), |s| {
                calls += 1;
                Some(detail(&s.sha))
            });
        }
        assert_eq!(calls, 1);
        assert!(agg.get("a").and_then(|c| c.detail.as_ref()).is_some());
    }

    #[test]
    fn test_mismatched_detail_is_discarded() {
        let mut agg = DedupAggregator::new();
        agg.observe_with(summary("a", "main", 1), |_| Some(detail("b")));
        assert!(agg.get("a").expect("present").detail.is_none());
    }

    #[test]
    fn test_missing_detail_keeps_commit() {
        let mut agg = DedupAggregator::new();
        agg.observe_with(summary("a", "main", 1), |_| None);
        assert_eq!(agg.len(), 1);
    }

    #[test]
    fn test_export_sorts_newest_first_with_stable_ties() {
        let mut agg = DedupAggregator::new();
        agg.observe(summary("old", "main", 1));
        agg.observe(summary("tie1", "main", 30));
        agg.observe(summary("new", "main", 59));
        agg.observe(summary("tie2", "dev", 30));

        let shas: Vec<String> = agg.export().into_iter().map(|c| c.sha).collect();
        assert_eq!(shas, vec!["new", "tie1", "tie2", "old"]);
    }
}
