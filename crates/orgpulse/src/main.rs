// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! orgpulse: hourly commit activity reports for a GitHub organization
//!
//! Collects every unique commit in the requested window across all
//! repositories and branches, writes the report files, and prints the
//! summary to stdout.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use orgpulse::collect::Collector;
use orgpulse::config::Config;
use orgpulse_github::{GithubClient, RateLimitedTransport, UniqueCommit, UreqClient};
use orgpulse_report::{ReportBundle, ReportWriter};
use tracing::{error, info};

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr so the printed summary can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    config.validate().context("Invalid configuration")?;
    let started = Instant::now();
    let window = config.window(Utc::now())?;
    let token = config.token()?;

    info!(
        org = %window.organization(),
        since = %window.since(),
        until = %window.until(),
        "Starting collection"
    );

    let transport = RateLimitedTransport::new(UreqClient::new())
        .with_guard(Duration::from_secs(config.rate_limit_guard));
    let client = GithubClient::with_transport(transport, token).with_api_url(&config.api_url);

    let collection = Collector::new(&client, config.collect_options())
        .collect(&window)
        .with_context(|| format!("Collection failed for {}", window.organization()))?;

    let bundle = ReportBundle::new(window, collection.commits, Utc::now(), started.elapsed());
    let written = ReportWriter::new(config.output_dir.clone())
        .with_individual_files(!config.no_individual_files)
        .write(&bundle)
        .context("Failed to write reports")?;

    println!("{}", bundle.summary());
    for commit in bundle.commits() {
        println!("{}", listing_line(commit));
    }
    println!("Reports written to {}", written.dir.display());
    Ok(())
}

fn listing_line(commit: &UniqueCommit) -> String {
    format!(
        "{} {} [{}] {}: {}",
        commit.short_sha(),
        commit.repo,
        commit.branches_joined(),
        commit.author,
        commit.subject()
    )
}
