//! Plain-text run metadata

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::summary::display_time;

/// File name of the metadata record inside a run directory
pub const METADATA_FILE: &str = "metadata.txt";

/// Key facts about one collection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    /// Organization name
    pub organization: String,
    /// Window start
    pub since: DateTime<Utc>,
    /// Window end
    pub until: DateTime<Utc>,
    /// Number of unique commits
    pub total_commits: usize,
    /// Wall-clock time the collection finished
    pub collected_at: DateTime<Utc>,
    /// How long the collection took
    pub elapsed: Duration,
}

impl RunMetadata {
    /// Render as `Key: value` lines
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "GitHub Commit Collection\n\
             Organization: {}\n\
             Start Time: {}\n\
             End Time: {}\n\
             Total Commits: {}\n\
             Collection Time: {}\n\
             Collection Duration: {:.1}s\n",
            self.organization,
            display_time(self.since),
            display_time(self.until),
            self.total_commits,
            self.collected_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.elapsed.as_secs_f64(),
        )
    }
}
