//! Remote API abstraction and implementations
//!
//! The sweep only needs two things from the service: establish an
//! authenticated session, and delete one status by id. [`StatusApi`] is
//! that seam; [`twitter::TwitterClient`] talks to the real API and
//! [`mock::MockStatusApi`] stands in for it in tests.
//!
//! # Examples
//!
//! ```no_run
//! use libtweetsweep::config::Config;
//! use libtweetsweep::platforms::{twitter::TwitterClient, StatusApi};
//!
//! # async fn example() -> libtweetsweep::error::Result<()> {
//! let config = Config::load(None)?;
//! let mut client = TwitterClient::from_config(&config)?;
//!
//! client.authenticate().await?;
//! client.destroy_status("1212345678901234567").await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::PlatformError;

pub mod oauth;
pub mod twitter;

// Available outside tests so integration tests can use it
pub mod mock;

/// Status deletion API
#[async_trait]
pub trait StatusApi: Send + Sync {
    /// Establish the API session
    ///
    /// Called once before the first deletion.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Authentication` if the credentials are
    /// rejected.
    async fn authenticate(&mut self) -> Result<(), PlatformError>;

    /// Delete a single status by id
    ///
    /// # Errors
    ///
    /// `PlatformError::Api` carries the HTTP status and, when the service
    /// sent one, its numeric error code. Callers decide which codes are
    /// survivable.
    async fn destroy_status(&self, id: &str) -> Result<(), PlatformError>;

    /// Lowercase identifier used in log output
    fn name(&self) -> &str;
}
