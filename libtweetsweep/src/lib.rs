//! tweet-sweep - delete old tweets using your Twitter archive
//!
//! Reads the `tweet.js` file from a Twitter data export, selects the
//! tweets created before a cutoff date and deletes them one at a time
//! through the API, pacing requests to stay under the rate limit.

pub mod archive;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod platforms;
pub mod prompt;
pub mod rate_limiter;
pub mod sweeper;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SweepError};
pub use filter::Cutoff;
pub use sweeper::{DeleteOutcome, Sweeper};
pub use types::{SweepSummary, Tweet};
