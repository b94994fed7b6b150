//! Commit types shared by the collector and the report writer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization member login
pub type Identity = String;

/// Placeholder used wherever an author login could not be resolved
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Number of hex characters in a short SHA
pub const SHORT_SHA_LEN: usize = 8;

/// Get the first [`SHORT_SHA_LEN`] characters of a SHA
#[must_use]
pub fn short_sha(sha: &str) -> &str {
    sha.get(..SHORT_SHA_LEN).unwrap_or(sha)
}

/// One commit as listed on one branch
///
/// Two summaries with the same `sha` are the same commit; `branch` only
/// records where this observation came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Repository the commit was listed in
    pub repo: String,
    /// Branch the commit was listed on
    pub branch: String,
    /// Full commit message
    pub message: String,
    /// Author display name
    pub author: String,
    /// Author login, when the upstream could link the commit to an account
    pub author_login: Option<Identity>,
    /// Authored timestamp
    pub timestamp: DateTime<Utc>,
    /// Web permalink to the commit
    pub permalink: String,
}

impl CommitSummary {
    /// Get the short SHA
    #[must_use]
    pub fn short_sha(&self) -> &str {
        short_sha(&self.sha)
    }
}

/// Change status of one file in a commit
///
/// Upstream reports deletions as `removed`; `deleted` is accepted too.
/// Statuses outside the four named ones keep their upstream text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileStatus {
    /// File was created
    Added,
    /// File contents changed
    Modified,
    /// File was removed
    Deleted,
    /// File was moved (possibly with edits)
    Renamed,
    /// Any other upstream status (copied, changed, unchanged), verbatim
    Other(String),
}

impl FileStatus {
    /// Lowercase name as used by the upstream API
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "removed",
            Self::Renamed => "renamed",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for FileStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "added" => Self::Added,
            "modified" => Self::Modified,
            "removed" | "deleted" => Self::Deleted,
            "renamed" => Self::Renamed,
            _ => Self::Other(status),
        }
    }
}

impl From<FileStatus> for String {
    fn from(status: FileStatus) -> Self {
        match status {
            FileStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-file change statistics and patch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Path to the file
    pub path: String,
    /// Change status
    pub status: FileStatus,
    /// Number of lines added
    pub additions: u64,
    /// Number of lines deleted
    pub deletions: u64,
    /// Unified diff text; empty for binary or oversized diffs
    pub patch: String,
}

/// Aggregate line statistics for a commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    /// Total lines added
    pub additions: u64,
    /// Total lines deleted
    pub deletions: u64,
    /// Total lines changed
    pub total: u64,
}

/// Detailed change information for a single commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    /// SHA of the commit this detail belongs to
    pub sha: String,
    /// Aggregate statistics
    pub stats: CommitStats,
    /// Per-file changes, in upstream order
    pub files: Vec<FileChange>,
}

impl CommitDetail {
    /// Number of files changed
    #[must_use]
    pub fn files_changed(&self) -> usize {
        self.files.len()
    }
}

/// A commit after merging every branch it was observed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueCommit {
    /// The commit SHA
    pub sha: String,
    /// Repository the commit belongs to
    pub repo: String,
    /// Full commit message
    pub message: String,
    /// Author display name
    pub author: String,
    /// Author login, if resolvable
    pub author_login: Option<Identity>,
    /// Authored timestamp
    pub timestamp: DateTime<Utc>,
    /// Web permalink to the commit
    pub permalink: String,
    /// Branches the commit was seen on, in order of first appearance
    pub branches: Vec<String>,
    /// Per-file statistics, when fetched successfully
    pub detail: Option<CommitDetail>,
}

impl UniqueCommit {
    /// Seed a unique commit from its first observation
    #[must_use]
    pub fn from_summary(summary: CommitSummary) -> Self {
        Self {
            sha: summary.sha,
            repo: summary.repo,
            message: summary.message,
            author: summary.author,
            author_login: summary.author_login,
            timestamp: summary.timestamp,
            permalink: summary.permalink,
            branches: vec![summary.branch],
            detail: None,
        }
    }

    /// Record another branch this commit appears on
    ///
    /// Returns `false` if the branch was already recorded.
    pub fn observe_branch(&mut self, branch: &str) -> bool {
        if self.branches.iter().any(|b| b == branch) {
            return false;
        }
        self.branches.push(branch.to_string());
        true
    }

    /// Attach detail; ignored if it belongs to a different SHA
    ///
    /// Returns `true` when the detail was attached.
    pub fn attach_detail(&mut self, detail: CommitDetail) -> bool {
        if detail.sha != self.sha {
            return false;
        }
        self.detail = Some(detail);
        true
    }

    /// Get the short SHA
    #[must_use]
    pub fn short_sha(&self) -> &str {
        short_sha(&self.sha)
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Author login, or [`UNKNOWN_AUTHOR`]
    #[must_use]
    pub fn login_or_unknown(&self) -> &str {
        self.author_login.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Branch names joined for display
    #[must_use]
    pub fn branches_joined(&self) -> String {
        self.branches.join(", ")
    }

    /// Whether detail with at least one file change is attached
    #[must_use]
    pub fn has_file_changes(&self) -> bool {
        self.detail.as_ref().is_some_and(|d| !d.files.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    fn sample_summary() -> CommitSummary {
        CommitSummary {
            sha: "abc12345c752534e733c38ba0109dc3b741f0a6e".to_string(),
            repo: "svc".to_string(),
            branch: "main".to_string(),
            message: "feat(api): add health endpoint\n\nDetailed description here.".to_string(),
            author: "Alice Example".to_string(),
            author_login: Some("alice".to_string()),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 17, 2, 33, 6).unwrap(),
            permalink: "https://github.com/acme/svc/commit/abc12345".to_string(),
        }
    }

    fn sample_detail(sha: &str) -> CommitDetail {
        CommitDetail {
            sha: sha.to_string(),
            stats: CommitStats {
                additions: 3,
                deletions: 1,
                total: 4,
            },
            files: vec![FileChange {
                path: "src/lib.rs".to_string(),
                status: FileStatus::Modified,
                additions: 3,
                deletions: 1,
                patch: "@@ -1 +1,3 @@".to_string(),
            }],
        }
    }

    #[test]
    fn test_short_sha_is_eight_characters() {
        let summary = sample_summary();
        assert_eq!(summary.short_sha(), "abc12345");
    }

    #[test]
    fn test_short_sha_handles_short_input() {
        assert_eq!(short_sha("abc"), "abc");
    }

    #[test]
    fn test_subject_multiline() {
        let unique = UniqueCommit::from_summary(sample_summary());
        assert_eq!(unique.subject(), "feat(api): add health endpoint");
    }

    #[test]
    fn test_from_summary_seeds_single_branch() {
        let unique = UniqueCommit::from_summary(sample_summary());
        assert_eq!(unique.branches, vec!["main".to_string()]);
        assert!(unique.detail.is_none());
        assert_eq!(unique.sha, "abc12345c752534e733c38ba0109dc3b741f0a6e");
    }

    #[test]
    fn test_observe_branch_skips_duplicates() {
        let mut unique = UniqueCommit::from_summary(sample_summary());
        assert!(unique.observe_branch("dev"));
        assert!(!unique.observe_branch("main"));
        assert!(!unique.observe_branch("dev"));
        assert_eq!(unique.branches, vec!["main".to_string(), "dev".to_string()]);
        assert_eq!(unique.branches_joined(), "main, dev");
    }

    #[test]
    fn test_attach_detail_requires_matching_sha() {
        let mut unique = UniqueCommit::from_summary(sample_summary());
        assert!(!unique.attach_detail(sample_detail("ffffffff")));
        assert!(unique.detail.is_none());

        let sha = unique.sha.clone();
        assert!(unique.attach_detail(sample_detail(&sha)));
        assert!(unique.has_file_changes());
    }

    #[test]
    fn test_login_or_unknown() {
        let mut unique = UniqueCommit::from_summary(sample_summary());
        assert_eq!(unique.login_or_unknown(), "alice");
        unique.author_login = None;
        assert_eq!(unique.login_or_unknown(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_file_status_removed_is_deleted() {
        let status: FileStatus = serde_json::from_str("\"removed\"").expect("deserialize");
        assert_eq!(status, FileStatus::Deleted);
        let status: FileStatus = serde_json::from_str("\"deleted\"").expect("deserialize");
        assert_eq!(status, FileStatus::Deleted);
        assert_eq!(status.to_string(), "removed");
    }

    #[test]
    fn test_file_status_keeps_unknown_text() {
        let status: FileStatus = serde_json::from_str("\"copied\"").expect("deserialize");
        assert_eq!(status, FileStatus::Other("copied".to_string()));
        assert_eq!(status.to_string(), "copied");
        assert_eq!(serde_json::to_string(&status).expect("serialize"), "\"copied\"");

        let status: FileStatus = serde_json::from_str("\"renamed\"").expect("deserialize");
        assert_eq!(status, FileStatus::Renamed);
    }

    #[test]
    fn test_unique_commit_json_format() {
        let unique = UniqueCommit::from_summary(sample_summary());
        let json = serde_json::to_string_pretty(&unique).expect("serialize");
        assert!(json.contains("\"branches\":"));
        assert!(json.contains("2026-01-17"));
    }
}
