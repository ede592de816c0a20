//! The deletion loop
//!
//! Walks the selected tweets in archive order, pacing requests and sorting
//! each API response into deleted / tolerated / fatal. A fatal error stops
//! the run immediately; tweets already deleted stay deleted.

use std::io::Write;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::ApiConfig;
use crate::error::{PlatformError, Result};
use crate::platforms::StatusApi;
use crate::rate_limiter::Pacer;
use crate::types::{SweepSummary, Tweet};

/// Result of a single deletion attempt
#[derive(Debug, Clone)]
pub enum DeleteOutcome {
    Deleted,
    /// The API refused with a code the run can survive
    Tolerated(PlatformError),
    /// Anything else; the run must stop
    Fatal(PlatformError),
}

/// Deletes tweets through a [`StatusApi`]
pub struct Sweeper<A: StatusApi> {
    api: A,
    pacer: Pacer,
    tolerated_codes: Vec<u32>,
}

impl<A: StatusApi> Sweeper<A> {
    pub fn new(api: A, pacer: Pacer, tolerated_codes: Vec<u32>) -> Self {
        Self {
            api,
            pacer,
            tolerated_codes,
        }
    }

    /// Build a sweeper using the pacing and tolerated codes from config
    pub fn from_config(api: A, config: &ApiConfig) -> Self {
        Self::new(
            api,
            Pacer::new(Duration::from_millis(config.pacing_interval_ms)),
            config.tolerated_error_codes.clone(),
        )
    }

    /// Establish the API session
    pub async fn authenticate(&mut self) -> Result<()> {
        info!("Authenticating with {}", self.api.name());
        self.api.authenticate().await?;
        Ok(())
    }

    fn is_tolerated(&self, error: &PlatformError) -> bool {
        error
            .api_code()
            .is_some_and(|code| self.tolerated_codes.contains(&code))
    }

    /// Attempt to delete one tweet
    ///
    /// Waits for the pacer first. Only a successful deletion resets the
    /// pacing window.
    pub async fn delete(&mut self, tweet: &Tweet) -> DeleteOutcome {
        self.pacer.wait().await;

        match self.api.destroy_status(&tweet.id).await {
            Ok(()) => {
                self.pacer.record_success();
                DeleteOutcome::Deleted
            }
            Err(error) if self.is_tolerated(&error) => DeleteOutcome::Tolerated(error),
            Err(error) => DeleteOutcome::Fatal(error),
        }
    }

    /// Delete every tweet in `targets`, in order
    ///
    /// Writes one `Deleting tweet from <date>: <text>` line per tweet to
    /// `out`. `total` is the archive size, used only for the summary.
    ///
    /// # Errors
    ///
    /// Returns the first fatal API error; no later tweet is attempted.
    pub async fn run(
        &mut self,
        targets: &[Tweet],
        total: usize,
        out: &mut dyn Write,
    ) -> Result<SweepSummary> {
        let mut summary = SweepSummary {
            total,
            candidates: targets.len(),
            ..Default::default()
        };

        for tweet in targets {
            writeln!(
                out,
                "Deleting tweet from {}: {}",
                tweet.date_label(),
                tweet.text
            )?;

            match self.delete(tweet).await {
                DeleteOutcome::Deleted => summary.deleted += 1,
                DeleteOutcome::Tolerated(error) => {
                    debug!("Skipping tweet {}: {}", tweet.id, error);
                    summary.tolerated += 1;
                }
                DeleteOutcome::Fatal(error) => {
                    error!(
                        "Stopping after {} deletion(s): tweet {} failed: {}",
                        summary.deleted, tweet.id, error
                    );
                    return Err(error.into());
                }
            }
        }

        if summary.tolerated > 0 {
            warn!(
                "{} tweet(s) could not be deleted (already gone or not accessible)",
                summary.tolerated
            );
        }

        Ok(summary)
    }
}
