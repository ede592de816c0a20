//! Cutoff handling and the "older than" predicate

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::archive::{ArchiveEntry, ArchivedTweet};
use crate::error::ArchiveError;
use crate::types::Tweet;

/// Timestamp format used by `created_at` in the archive,
/// e.g. `Wed Jan 01 12:00:00 +0000 2020`
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Format accepted for the cutoff date on the command line
pub const CUTOFF_DATE_FORMAT: &str = "%Y-%m-%d";

/// The instant before which tweets are deleted
///
/// Built from a timezone-naive date, taken as midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoff {
    date: NaiveDate,
    instant: DateTime<Utc>,
}

impl Cutoff {
    pub fn from_date(date: NaiveDate) -> Self {
        let instant = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        Self { date, instant }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Long form used in the confirmation prompt, e.g. `January 1, 2022`
    pub fn long_label(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

/// Parse a `YYYY-MM-DD` cutoff date
///
/// Shaped for use as a clap `value_parser`.
pub fn parse_cutoff_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), CUTOFF_DATE_FORMAT)
        .map_err(|e| format!("expected a date as YYYY-MM-DD, got '{}' ({})", s, e))
}

/// Parse an archive `created_at` value
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_str(value, ARCHIVE_TIMESTAMP_FORMAT)
}

fn tweet_timestamp(tweet: &ArchivedTweet) -> Result<DateTime<FixedOffset>, ArchiveError> {
    parse_timestamp(&tweet.created_at).map_err(|source| ArchiveError::Timestamp {
        id: tweet.id.clone(),
        value: tweet.created_at.clone(),
        source,
    })
}

/// Whether the entry was created strictly before the cutoff
///
/// A tweet created exactly at the cutoff instant is not older.
pub fn is_older_than(entry: &ArchiveEntry, cutoff: &Cutoff) -> Result<bool, ArchiveError> {
    let created_at = tweet_timestamp(&entry.tweet)?;
    Ok(created_at.with_timezone(&Utc) < cutoff.instant())
}

/// Select the tweets older than the cutoff, in archive order
///
/// Every timestamp is checked before anything is returned, so a malformed
/// entry stops the run before any deletion happens.
pub fn select_expired(entries: &[ArchiveEntry], cutoff: &Cutoff) -> Result<Vec<Tweet>, ArchiveError> {
    let mut expired = Vec::new();

    for entry in entries {
        let created_at = tweet_timestamp(&entry.tweet)?;
        if created_at.with_timezone(&Utc) < cutoff.instant() {
            expired.push(Tweet {
                id: entry.tweet.id.clone(),
                created_at,
                text: entry.tweet.full_text.clone(),
            });
        }
    }

    Ok(expired)
}
