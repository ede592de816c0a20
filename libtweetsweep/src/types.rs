//! Core types for tweet-sweep

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A tweet selected for deletion
///
/// Built from an archive entry once its timestamp has been parsed. Never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tweet {
    pub id: String,
    pub created_at: DateTime<FixedOffset>,
    pub text: String,
}

impl Tweet {
    /// The creation date as shown in progress lines (`YYYY-MM-DD`)
    pub fn date_label(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

/// Counts reported at the end of a sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Tweets in the archive
    pub total: usize,
    /// Tweets older than the cutoff
    pub candidates: usize,
    pub deleted: usize,
    /// Deletions that failed with a tolerated error code
    pub tolerated: usize,
}

impl SweepSummary {
    /// Tweets left alone because they are newer than the cutoff
    pub fn kept(&self) -> usize {
        self.total.saturating_sub(self.candidates)
    }

    pub fn display(&self) {
        println!(
            "Deleted {} tweet(s); {} already gone or not accessible; {} newer tweet(s) kept",
            self.deleted,
            self.tolerated,
            self.kept()
        );
    }
}
