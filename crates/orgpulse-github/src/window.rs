// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The time window scoping one collection run

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A window whose start lies after its end
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("window start {since} is after window end {until}")]
pub struct InvalidWindow {
    /// Requested start
    pub since: DateTime<Utc>,
    /// Requested end
    pub until: DateTime<Utc>,
}

/// The `[since, until)` interval collected for one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunWindow {
    organization: String,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
}

impl RunWindow {
    /// Create a window, rejecting `since > until`
    ///
    /// # Errors
    ///
    /// Returns `InvalidWindow` if the bounds are reversed.
    pub fn new(
        organization: impl Into<String>,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Self, InvalidWindow> {
        if since > until {
            return Err(InvalidWindow { since, until });
        }
        Ok(Self {
            organization: organization.into(),
            since,
            until,
        })
    }

    /// The window covering the `hours` leading up to `now`
    ///
    /// The start saturates at the earliest representable instant.
    #[must_use]
    pub fn last_hours(organization: impl Into<String>, now: DateTime<Utc>, hours: u32) -> Self {
        let since = now
            .checked_sub_signed(Duration::hours(i64::from(hours)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            organization: organization.into(),
            since,
            until: now,
        }
    }

    /// Organization name
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Inclusive start
    #[must_use]
    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }

    /// Exclusive end
    #[must_use]
    pub fn until(&self) -> DateTime<Utc> {
        self.until
    }

    /// Whether `timestamp` falls inside `[since, until)`
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.since <= timestamp && timestamp < self.until
    }
}

/// Format a timestamp the way the upstream API expects query bounds
#[must_use]
pub fn iso8601(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
