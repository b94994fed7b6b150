// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! orgpulse-github: GitHub organization traversal for orgpulse
//!
//! This library crate provides the rate-limited, paginated client used to
//! enumerate an organization's members, repositories, branches and commits,
//! together with the commit data model shared across the workspace.
//!
//! # Example
//!
//! ```no_run
//! use orgpulse_github::{CommitQuery, GithubClient, OrgApi};
//!
//! let client = GithubClient::new("ghp_example");
//! for repo in client.repositories("acme").expect("list repos") {
//!     let commits = client
//!         .commits("acme", &repo, "main", &CommitQuery::all())
//!         .unwrap_or_default();
//!     println!("{repo}: {} commits", commits.len());
//! }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod clock;
pub mod commit;
pub mod error;
pub mod pagination;
pub mod transport;
pub mod window;

mod wire;

pub use client::{CommitQuery, DEFAULT_API_URL, GithubClient, OrgApi};
pub use clock::{Clock, ManualClock, SystemClock};
pub use commit::{
    CommitDetail, CommitStats, CommitSummary, FileChange, FileStatus, Identity, UniqueCommit,
};
pub use error::{BranchFetchError, GithubError};
pub use pagination::{Page, PageCursor};
pub use transport::{
    DEFAULT_GUARD_SECONDS, HttpClient, HttpResponse, RateLimitedTransport, UreqClient,
};
pub use window::{InvalidWindow, RunWindow};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::{CommitQuery, GithubClient, OrgApi};
    pub use crate::commit::{CommitDetail, CommitSummary, UniqueCommit};
    pub use crate::error::{BranchFetchError, GithubError};
    pub use crate::window::RunWindow;
}
