//! Request pacing for deletions
//!
//! Keeps deletions under the API's per-second limit with a fixed-window
//! throttle: if the last successful deletion was less than one interval
//! ago, wait a full interval before sending the next request.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::trace;

pub const DEFAULT_PACING_INTERVAL: Duration = Duration::from_secs(1);

/// Tracks the last successful deletion and throttles the next one
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last_success: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_success: None,
        }
    }

    /// Whether the next request would have to wait
    pub fn should_wait(&self) -> bool {
        match self.last_success {
            Some(last) => last.elapsed() < self.interval,
            None => false,
        }
    }

    /// Block until the next request may be sent
    pub async fn wait(&self) {
        if self.should_wait() {
            trace!("Pacing: sleeping {:?} before next deletion", self.interval);
            sleep(self.interval).await;
        }
    }

    /// Record a successful deletion at the current instant
    pub fn record_success(&mut self) {
        self.last_success = Some(Instant::now());
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(DEFAULT_PACING_INTERVAL)
    }
}
