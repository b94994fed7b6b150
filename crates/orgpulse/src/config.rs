// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the orgpulse collector
//!
//! This module provides the command-line surface: organization and
//! credential, the collection window, report output options, and logging.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use orgpulse_github::{DEFAULT_API_URL, DEFAULT_GUARD_SECONDS, RunWindow};

use crate::collect::CollectOptions;

/// Default base directory for report output
pub const DEFAULT_OUTPUT_DIR: &str = "hourly_reports";

/// Longest accepted collection window, ten years in hours
pub const MAX_HOURS_BACK: u32 = 24 * 366 * 10;

/// orgpulse - hourly commit activity reports for a GitHub organization
#[derive(Parser, Debug, Clone)]
#[command(name = "orgpulse")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// GitHub organization to report on
    #[arg(short, long, env = "GITHUB_ORG")]
    pub organization: Option<String>,

    /// Bearer token used for every API request
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Length of the collection window in hours, ending now
    #[arg(long, default_value_t = 1)]
    pub hours_back: u32,

    /// Include commits from authors outside the organization
    #[arg(long, default_value = "false")]
    pub include_all_users: bool,

    /// Skip fetching per-file commit detail
    #[arg(long, default_value = "false")]
    pub no_details: bool,

    /// Base directory for reports
    ///
    /// Each run writes into an hour-bucketed `YYYYmmdd_HH` subdirectory.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Skip writing one Markdown file per commit
    #[arg(long, default_value = "false")]
    pub no_individual_files: bool,

    /// Only collect from this repository (repeatable)
    #[arg(short, long = "repository", value_name = "REPO")]
    pub repositories: Vec<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Extra seconds to wait past a rate-limit reset
    #[arg(long, default_value_t = DEFAULT_GUARD_SECONDS)]
    pub rate_limit_guard: u64,

    /// Enable verbose logging (debug level)
    ///
    /// Logs go to stderr; stdout carries only the report summary.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organization: None,
            token: None,
            hours_back: 1,
            include_all_users: false,
            no_details: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            no_individual_files: false,
            repositories: Vec::new(),
            api_url: DEFAULT_API_URL.to_string(),
            rate_limit_guard: DEFAULT_GUARD_SECONDS,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// The organization name, trimmed
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingOrganization` if unset or blank.
    pub fn organization(&self) -> Result<&str, ConfigError> {
        non_blank(self.organization.as_deref()).ok_or(ConfigError::MissingOrganization)
    }

    /// The API token, trimmed
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` if unset or blank.
    pub fn token(&self) -> Result<&str, ConfigError> {
        non_blank(self.token.as_deref()).ok_or(ConfigError::MissingToken)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The token is missing or blank
    /// - The organization is missing or blank
    /// - The window is zero hours long or longer than `MAX_HOURS_BACK`
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.token()?;
        self.organization()?;
        self.hours_back()?;
        Ok(())
    }

    fn hours_back(&self) -> Result<u32, ConfigError> {
        if (1..=MAX_HOURS_BACK).contains(&self.hours_back) {
            Ok(self.hours_back)
        } else {
            Err(ConfigError::InvalidWindow(self.hours_back))
        }
    }

    /// The collection window `[now - hours_back, now)`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the organization is missing or the window
    /// length is out of range.
    pub fn window(&self, now: DateTime<Utc>) -> Result<RunWindow, ConfigError> {
        let org = self.organization()?;
        let hours = self.hours_back()?;
        Ok(RunWindow::last_hours(org, now, hours))
    }

    /// Traversal options derived from the flags
    #[must_use]
    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            members_only: !self.include_all_users,
            include_details: !self.no_details,
            repositories: self.repositories.clone(),
        }
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No API token was supplied
    #[error("Missing GitHub token: pass --token or set GITHUB_TOKEN")]
    MissingToken,

    /// No organization was supplied
    #[error("Missing organization: pass --organization or set GITHUB_ORG")]
    MissingOrganization,

    /// The window length is out of range
    #[error("Invalid collection window: --hours-back must be between 1 and {max}, got {0}", max = MAX_HOURS_BACK)]
    InvalidWindow(u32),
}
