// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-commit Markdown narratives

use orgpulse_github::{FileStatus, UniqueCommit};

/// Deterministic file name: `{repo}_{short sha}_{YYYYmmdd_HHMMSS}.md`
#[must_use]
pub fn commit_file_name(commit: &UniqueCommit) -> String {
    format!(
        "{}_{}_{}.md",
        commit.repo,
        commit.short_sha(),
        commit.timestamp.format("%Y%m%d_%H%M%S")
    )
}

fn status_marker(status: &FileStatus) -> &'static str {
    match status {
        FileStatus::Added => "🆕",
        FileStatus::Modified => "✏️",
        FileStatus::Deleted => "🗑️",
        FileStatus::Renamed => "🔄",
        FileStatus::Other(_) => "📝",
    }
}

/// Render the narrative for one commit
///
/// Returns `None` when the commit has no file changes to describe.
#[must_use]
pub fn render_commit(org: &str, commit: &UniqueCommit) -> Option<String> {
    if !commit.has_file_changes() {
        return None;
    }
    let detail = commit.detail.as_ref()?;

    let mut lines = vec![
        format!("# Commit Details: {}", commit.short_sha()),
        String::new(),
        format!(
            "**Repository:** [{repo}](https://github.com/{org}/{repo})",
            repo = commit.repo
        ),
        format!(
            "**Author:** {} ({})",
            commit.author,
            commit.login_or_unknown()
        ),
        format!("**Date:** {}", commit.timestamp.to_rfc3339()),
        format!("**Branch(es):** {}", commit.branches_joined()),
        format!("**Commit Link:** [View on GitHub]({})", commit.permalink),
        String::new(),
        "## Commit Message".to_string(),
        "```".to_string(),
        commit.message.clone(),
        "```".to_string(),
        String::new(),
        "## Statistics".to_string(),
        format!("- **Files changed:** {}", detail.files_changed()),
        format!("- **Lines added:** {}", detail.stats.additions),
        format!("- **Lines deleted:** {}", detail.stats.deletions),
        format!("- **Total changes:** {}", detail.stats.total),
        String::new(),
        "## File Changes".to_string(),
        String::new(),
    ];

    for file in &detail.files {
        lines.push(format!(
            "### {} {} ({})",
            status_marker(&file.status),
            file.path,
            file.status
        ));
        if file.additions > 0 || file.deletions > 0 {
            lines.push(format!(
                "**Changes:** +{} -{}",
                file.additions, file.deletions
            ));
        }
        if !file.patch.is_empty() {
            lines.push(String::new());
            lines.push("```diff".to_string());
            lines.push(file.patch.clone());
            lines.push("```".to_string());
        }
        lines.push(String::new());
    }

    Some(lines.join("\n"))
}
