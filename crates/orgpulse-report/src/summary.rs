//! Markdown activity summary

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use orgpulse_github::{RunWindow, UniqueCommit};

/// Permalinks listed per author before collapsing into a count
pub const MAX_LINKS: usize = 5;

/// Display format for window bounds
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub(crate) fn display_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}

/// Render the summary for `commits` (expected newest first)
///
/// Repositories and authors are listed alphabetically; links within an
/// author keep the order of `commits`.
#[must_use]
pub fn render_summary(window: &RunWindow, commits: &[UniqueCommit]) -> String {
    let org = window.organization();
    let start = display_time(window.since());
    let end = display_time(window.until());

    if commits.is_empty() {
        return format!("No commits found for {org} in the window {start} - {end}.");
    }

    let mut grouped: BTreeMap<&str, BTreeMap<&str, Vec<&UniqueCommit>>> = BTreeMap::new();
    for commit in commits {
        grouped
            .entry(commit.repo.as_str())
            .or_default()
            .entry(commit.author.as_str())
            .or_default()
            .push(commit);
    }

    let mut lines = vec![
        format!("# GitHub Activity Report for {org}"),
        format!("**Time Range:** {start} - {end}"),
        format!("**Total Commits:** {} (unique)", commits.len()),
        String::new(),
    ];

    for (repo, authors) in grouped {
        lines.push(format!(
            "## Repository: [{repo}](https://github.com/{org}/{repo})"
        ));
        for (author, authored) in authors {
            lines.push(format!(
                "- **{author}**: {} commits ({})",
                authored.len(),
                link_list(&authored)
            ));
        }
    }

    lines.join("\n")
}

fn link_list(commits: &[&UniqueCommit]) -> String {
    let mut links: Vec<String> = commits
        .iter()
        .take(MAX_LINKS)
        .enumerate()
        .map(|(i, c)| format!("[{}]({})", i + 1, c.permalink))
        .collect();
    if commits.len() > MAX_LINKS {
        links.push(format!("... (+{} more)", commits.len() - MAX_LINKS));
    }
    links.join(", ")
}
