//! Upstream JSON shapes
//!
//! Only the fields orgpulse reads are modelled; everything else is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::commit::{CommitDetail, CommitStats, CommitSummary, FileChange, FileStatus};

#[derive(Debug, Deserialize)]
pub(crate) struct Named {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Account {
    pub login: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitSignature {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitCommit {
    #[serde(default)]
    pub message: String,
    pub author: Option<GitSignature>,
}

/// An entry of the commit listing endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ListedCommit {
    pub sha: String,
    pub commit: GitCommit,
    pub author: Option<Account>,
}

impl ListedCommit {
    /// Login of the linked account, if any
    pub fn login(&self) -> Option<&str> {
        self.author.as_ref()?.login.as_deref()
    }

    /// Convert into a summary; `None` when the authored date is missing
    pub fn into_summary(self, org: &str, repo: &str, branch: &str) -> Option<CommitSummary> {
        let login = self.login().map(str::to_string);
        let signature = self.commit.author?;
        let timestamp = signature.date?;
        let permalink = format!("https://github.com/{org}/{repo}/commit/{}", self.sha);

        Some(CommitSummary {
            sha: self.sha,
            repo: repo.to_string(),
            branch: branch.to_string(),
            message: self.commit.message,
            author: signature
                .name
                .unwrap_or_else(|| crate::commit::UNKNOWN_AUTHOR.to_string()),
            author_login: login,
            timestamp,
            permalink,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Stats {
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangedFile {
    pub filename: String,
    pub status: FileStatus,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    pub patch: Option<String>,
}

/// Body of the single-commit endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct DetailedCommit {
    pub sha: String,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub files: Vec<ChangedFile>,
}

impl From<DetailedCommit> for CommitDetail {
    fn from(raw: DetailedCommit) -> Self {
        Self {
            sha: raw.sha,
            stats: CommitStats {
                additions: raw.stats.additions,
                deletions: raw.stats.deletions,
                total: raw.stats.total,
            },
            files: raw
                .files
                .into_iter()
                .map(|f| FileChange {
                    path: f.filename,
                    status: f.status,
                    additions: f.additions,
                    deletions: f.deletions,
                    patch: f.patch.unwrap_or_default(),
                })
                .collect(),
        }
    }
}
