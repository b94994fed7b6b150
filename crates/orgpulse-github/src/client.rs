// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Organization API client
//!
//! [`OrgApi`] is the read-only surface the collector traverses: members,
//! repositories, branches, commits per branch, and detail per commit.
//! [`GithubClient`] implements it over a [`RateLimitedTransport`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::commit::{CommitDetail, CommitSummary, Identity};
use crate::error::{BranchFetchError, GithubError};
use crate::pagination::PageCursor;
use crate::transport::{HttpClient, Pair, RateLimitedTransport, UreqClient};
use crate::window::{RunWindow, iso8601};
use crate::wire::{Account, DetailedCommit, ListedCommit, Named};

/// Default upstream API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: &str = "100";
const USER_AGENT: &str = concat!("orgpulse/", env!("CARGO_PKG_VERSION"));

/// Filters applied while listing a branch's commits
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitQuery<'a> {
    /// Only commits authored inside this window
    pub window: Option<&'a RunWindow>,
    /// Only commits whose author login is in this set
    pub allowed_authors: Option<&'a HashSet<Identity>>,
}

impl<'a> CommitQuery<'a> {
    /// A query with no filters
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a run window
    #[must_use]
    pub fn within(mut self, window: &'a RunWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Restrict to authors in `members`
    #[must_use]
    pub fn members_only(mut self, members: &'a HashSet<Identity>) -> Self {
        self.allowed_authors = Some(members);
        self
    }

    /// Whether the author passes the membership filter
    #[must_use]
    pub fn allows_author(&self, login: Option<&str>) -> bool {
        match self.allowed_authors {
            None => true,
            Some(members) => login.is_some_and(|l| members.contains(l)),
        }
    }

    /// Whether `timestamp` lies inside the window, if any
    #[must_use]
    pub fn allows_time(&self, timestamp: DateTime<Utc>) -> bool {
        self.window.is_none_or(|window| window.contains(timestamp))
    }

    /// Whether a listed commit passes every filter
    #[must_use]
    pub fn accepts(&self, summary: &CommitSummary) -> bool {
        self.allows_author(summary.author_login.as_deref()) && self.allows_time(summary.timestamp)
    }

    /// Query parameters for the first page of a branch listing
    #[must_use]
    pub fn params(&self, branch: &str) -> Vec<Pair> {
        let mut params = vec![
            ("sha".to_string(), branch.to_string()),
            ("per_page".to_string(), PER_PAGE.to_string()),
        ];
        if let Some(window) = self.window {
            params.push(("since".to_string(), iso8601(window.since())));
            params.push(("until".to_string(), iso8601(window.until())));
        }
        params
    }
}

/// Read-only view of an organization
pub trait OrgApi {
    /// Logins of every organization member
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if any page cannot be fetched.
    fn members(&self, org: &str) -> Result<HashSet<Identity>, GithubError>;

    /// Names of every repository, in upstream order
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if any page cannot be fetched.
    fn repositories(&self, org: &str) -> Result<Vec<String>, GithubError>;

    /// Names of every branch of `repo`, in upstream order
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if any page cannot be fetched, e.g. for an
    /// empty or disabled repository.
    fn branches(&self, org: &str, repo: &str) -> Result<Vec<String>, GithubError>;

    /// Commits on `branch` that pass `query`
    ///
    /// # Errors
    ///
    /// Returns `BranchFetchError` carrying the commits accepted before the
    /// failure.
    fn commits(
        &self,
        org: &str,
        repo: &str,
        branch: &str,
        query: &CommitQuery<'_>,
    ) -> Result<Vec<CommitSummary>, BranchFetchError>;

    /// Per-file statistics for one commit
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if the commit cannot be fetched or parsed.
    fn commit_detail(&self, org: &str, repo: &str, sha: &str)
    -> Result<CommitDetail, GithubError>;
}

/// [`OrgApi`] over the GitHub REST API
pub struct GithubClient<H = UreqClient, C = SystemClock> {
    transport: RateLimitedTransport<H, C>,
    api_url: String,
    headers: Vec<Pair>,
}

impl GithubClient<UreqClient, SystemClock> {
    /// Create a client for the public API authenticating with `token`
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self::with_transport(RateLimitedTransport::new(UreqClient::new()), token)
    }
}

impl<H: HttpClient, C: Clock> GithubClient<H, C> {
    /// Create a client over an existing transport
    #[must_use]
    pub fn with_transport(transport: RateLimitedTransport<H, C>, token: &str) -> Self {
        let headers = vec![
            ("Authorization".to_string(), format!("Bearer {token}")),
            (
                "Accept".to_string(),
                "application/vnd.github+json".to_string(),
            ),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        Self {
            transport,
            api_url: DEFAULT_API_URL.to_string(),
            headers,
        }
    }

    /// Point the client at a different API root (e.g. GitHub Enterprise)
    #[must_use]
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// The underlying transport
    #[must_use]
    pub fn transport(&self) -> &RateLimitedTransport<H, C> {
        &self.transport
    }

    fn cursor(&self, path: &str, params: Vec<Pair>) -> PageCursor<'_, H, C> {
        PageCursor::new(
            &self.transport,
            &self.headers,
            format!("{}{path}", self.api_url),
            params,
        )
    }

    fn per_page() -> Vec<Pair> {
        vec![("per_page".to_string(), PER_PAGE.to_string())]
    }

    /// Drain a collection, deserializing every item
    fn drain<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GithubError> {
        self.cursor(path, Self::per_page())
            .collect_items()?
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(GithubError::from))
            .collect()
    }
}

impl<H: HttpClient, C: Clock> OrgApi for GithubClient<H, C> {
    fn members(&self, org: &str) -> Result<HashSet<Identity>, GithubError> {
        let accounts: Vec<Account> = self.drain(&format!("/orgs/{org}/members"))?;
        Ok(accounts.into_iter().filter_map(|a| a.login).collect())
    }

    fn repositories(&self, org: &str) -> Result<Vec<String>, GithubError> {
        let repos: Vec<Named> = self.drain(&format!("/orgs/{org}/repos"))?;
        Ok(repos.into_iter().map(|r| r.name).collect())
    }

    fn branches(&self, org: &str, repo: &str) -> Result<Vec<String>, GithubError> {
        let branches: Vec<Named> = self.drain(&format!("/repos/{org}/{repo}/branches"))?;
        Ok(branches.into_iter().map(|b| b.name).collect())
    }

    fn commits(
        &self,
        org: &str,
        repo: &str,
        branch: &str,
        query: &CommitQuery<'_>,
    ) -> Result<Vec<CommitSummary>, BranchFetchError> {
        let mut accepted = Vec::new();
        let mut skipped = 0usize;

        for page in self.cursor(&format!("/repos/{org}/{repo}/commits"), query.params(branch)) {
            let items = match page {
                Ok(items) => items,
                Err(source) => {
                    return Err(BranchFetchError {
                        repo: repo.to_string(),
                        branch: branch.to_string(),
                        partial: accepted,
                        source,
                    });
                }
            };

            for item in items {
                let listed: ListedCommit = match serde_json::from_value(item) {
                    Ok(listed) => listed,
                    Err(e) => {
                        warn!(repo = %repo, branch = %branch, error = %e, "Skipping unparseable commit");
                        continue;
                    }
                };
                if !query.allows_author(listed.login()) {
                    skipped += 1;
                    continue;
                }
                let sha = listed.sha.clone();
                let Some(summary) = listed.into_summary(org, repo, branch) else {
                    warn!(repo = %repo, branch = %branch, sha = %sha, "Skipping commit without author date");
                    continue;
                };
                if query.accepts(&summary) {
                    accepted.push(summary);
                } else {
                    skipped += 1;
                }
            }
        }

        debug!(
            repo = %repo,
            branch = %branch,
            accepted = accepted.len(),
            skipped,
            "Listed branch commits"
        );
        Ok(accepted)
    }

    fn commit_detail(
        &self,
        org: &str,
        repo: &str,
        sha: &str,
    ) -> Result<CommitDetail, GithubError> {
        let url = format!("{}/repos/{org}/{repo}/commits/{sha}", self.api_url);
        let response = self.transport.get(&url, &self.headers, &[])?;
        let raw: DetailedCommit = serde_json::from_str(&response.body)?;
        if raw.sha != sha {
            return Err(GithubError::MalformedResponse {
                message: format!("requested commit {sha} but received {}", raw.sha),
            });
        }
        Ok(raw.into())
    }
}
