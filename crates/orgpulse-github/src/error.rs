// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for orgpulse-github

use thiserror::Error;

use crate::commit::CommitSummary;

/// Errors that can occur while talking to the upstream API
#[derive(Debug, Error)]
pub enum GithubError {
    /// Non-success HTTP status that is not a rate-limit exhaustion
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        /// The HTTP status code
        status: u16,
        /// The requested URL
        url: String,
        /// Response body, as returned by the server
        body: String,
    },

    /// Connection or I/O failure reported by the HTTP client
    #[error("Transport error for {url}: {message}")]
    Transport {
        /// The requested URL
        url: String,
        /// Description of the failure
        message: String,
    },

    /// Response body was not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response was valid JSON but lacked a required field
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// Description of what was missing
        message: String,
    },
}

/// A branch commit listing that failed part way through
///
/// Commits fetched before the failure are kept in `partial` so the caller
/// can still aggregate them.
#[derive(Debug, Error)]
#[error("commit listing for {repo}/{branch} stopped after {count} commits: {source}", count = .partial.len())]
pub struct BranchFetchError {
    /// Repository name
    pub repo: String,
    /// Branch name
    pub branch: String,
    /// Commits accepted before the failure
    pub partial: Vec<CommitSummary>,
    /// The underlying failure
    #[source]
    pub source: GithubError,
}
