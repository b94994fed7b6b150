//! Row-oriented commit export
//!
//! Nested data (per-file changes) is left out; aggregate stats are
//! flattened into columns and default to zero when detail is missing.

use orgpulse_github::UniqueCommit;
use serde::Serialize;

/// Column names, in output order
pub const COLUMNS: [&str; 12] = [
    "repo",
    "branches",
    "sha",
    "message",
    "author",
    "author_login",
    "date",
    "commit_link",
    "total_additions",
    "total_deletions",
    "total_changes",
    "files_changed",
];

/// One flattened commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRow {
    /// Repository name
    pub repo: String,
    /// Branch names joined with ", "
    pub branches: String,
    /// Full SHA
    pub sha: String,
    /// Full commit message
    pub message: String,
    /// Author display name
    pub author: String,
    /// Author login or "Unknown"
    pub author_login: String,
    /// RFC 3339 authored timestamp
    pub date: String,
    /// Web permalink
    pub commit_link: String,
    /// Lines added
    pub total_additions: u64,
    /// Lines deleted
    pub total_deletions: u64,
    /// Lines changed
    pub total_changes: u64,
    /// Files changed
    pub files_changed: usize,
}

impl From<&UniqueCommit> for CommitRow {
    fn from(commit: &UniqueCommit) -> Self {
        let stats = commit.detail.as_ref().map(|d| d.stats).unwrap_or_default();
        Self {
            repo: commit.repo.clone(),
            branches: commit.branches_joined(),
            sha: commit.sha.clone(),
            message: commit.message.clone(),
            author: commit.author.clone(),
            author_login: commit.login_or_unknown().to_string(),
            date: commit.timestamp.to_rfc3339(),
            commit_link: commit.permalink.clone(),
            total_additions: stats.additions,
            total_deletions: stats.deletions,
            total_changes: stats.total,
            files_changed: commit.detail.as_ref().map_or(0, |d| d.files_changed()),
        }
    }
}

impl CommitRow {
    fn fields(&self) -> [String; 12] {
        [
            self.repo.clone(),
            self.branches.clone(),
            self.sha.clone(),
            self.message.clone(),
            self.author.clone(),
            self.author_login.clone(),
            self.date.clone(),
            self.commit_link.clone(),
            self.total_additions.to_string(),
            self.total_deletions.to_string(),
            self.total_changes.to_string(),
            self.files_changed.to_string(),
        ]
    }
}

/// Quote a field if it contains a delimiter, quote or line break
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn line<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = fields
        .into_iter()
        .map(|f| escape(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');
    out
}

/// Render rows as CSV with a header line
#[must_use]
pub fn render_csv(rows: &[CommitRow]) -> String {
    let mut out = line(COLUMNS);
    for row in rows {
        out.push_str(&line(row.fields()));
    }
    out
}
