//! Twitter archive reader
//!
//! The `data/tweet.js` file in a Twitter export is not plain JSON: the
//! array is prefixed with a JavaScript assignment such as
//! `window.YTD.tweet.part0 = `. This module strips that prefix and parses
//! the array into [`ArchiveEntry`] values, in file order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::ArchiveError;

/// Default archive file name, relative to the working directory
pub const DEFAULT_ARCHIVE_FILE: &str = "tweet.js";

/// Locations tried, in order, when the archive path is a folder
const ARCHIVE_CANDIDATES: &[&str] = &["data/tweet.js", "data/tweets.js"];

/// One element of the exported array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub tweet: ArchivedTweet,
}

/// The tweet object nested inside each archive entry
///
/// Only the fields needed for deletion are kept; the export carries many
/// more, which are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedTweet {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub full_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

// Current exports quote ids, very old ones did not.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Resolve the archive location
///
/// A folder is treated as the root of an unzipped export and searched for
/// the tweet file. Anything else is returned unchanged, after tilde
/// expansion.
pub fn resolve_archive_path(path: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string());

    if expanded.is_dir() {
        for candidate in ARCHIVE_CANDIDATES {
            let file = expanded.join(candidate);
            if file.is_file() {
                return file;
            }
        }
        return expanded.join(ARCHIVE_CANDIDATES[0]);
    }

    expanded
}

/// Read and parse an archive file
///
/// # Errors
///
/// - [`ArchiveError::NotFound`] if the file does not exist
/// - [`ArchiveError::Read`] if it cannot be read as UTF-8 text
/// - [`ArchiveError::MissingArray`] / [`ArchiveError::Parse`] if the
///   contents are not a prefixed JSON array of tweets
pub fn read_archive(path: &Path) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    if !path.is_file() {
        return Err(ArchiveError::NotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    let entries = parse_archive(&contents)?;
    debug!("Read {} tweet(s) from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse archive contents, skipping everything before the first `[`
pub fn parse_archive(contents: &str) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let array_start = contents.find('[').ok_or(ArchiveError::MissingArray)?;
    Ok(serde_json::from_str(&contents[array_start..])?)
}
