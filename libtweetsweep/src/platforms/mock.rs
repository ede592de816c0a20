//! Mock status API for testing
//!
//! Records every deletion attempt (with the time it was made) and returns
//! scripted errors for chosen ids, so sweep logic can be verified without
//! credentials or network access.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::PlatformError;
use crate::platforms::StatusApi;

/// A deletion attempt seen by the mock
#[derive(Debug, Clone)]
pub struct DestroyCall {
    pub id: String,
    pub at: Instant,
}

/// Mock implementation of [`StatusApi`]
///
/// Clones share their recorded state, so a test can keep one handle while
/// the sweeper owns another.
#[derive(Debug, Clone, Default)]
pub struct MockStatusApi {
    auth_error: Option<PlatformError>,
    failures: Arc<Mutex<HashMap<String, PlatformError>>>,
    auth_calls: Arc<Mutex<usize>>,
    destroy_calls: Arc<Mutex<Vec<DestroyCall>>>,
}

impl MockStatusApi {
    /// A mock where every call succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose authentication fails
    pub fn auth_failure(message: &str) -> Self {
        Self {
            auth_error: Some(PlatformError::Authentication(message.to_string())),
            ..Self::default()
        }
    }

    /// Make deleting `id` fail with `error`
    pub fn fail_on(self, id: &str, error: PlatformError) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(id.to_string(), error);
        self
    }

    /// Make deleting `id` fail with an API error carrying `code`
    pub fn fail_with_code(self, id: &str, status: u16, code: u32) -> Self {
        self.fail_on(
            id,
            PlatformError::Api {
                status,
                code: Some(code),
                message: format!("mock error {}", code),
            },
        )
    }

    pub fn auth_call_count(&self) -> usize {
        *self.auth_calls.lock().unwrap()
    }

    pub fn destroy_call_count(&self) -> usize {
        self.destroy_calls.lock().unwrap().len()
    }

    /// Ids passed to `destroy_status`, in call order
    pub fn destroyed_ids(&self) -> Vec<String> {
        self.destroy_calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| call.id.clone())
            .collect()
    }

    pub fn destroy_calls(&self) -> Vec<DestroyCall> {
        self.destroy_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusApi for MockStatusApi {
    async fn authenticate(&mut self) -> Result<(), PlatformError> {
        *self.auth_calls.lock().unwrap() += 1;

        match &self.auth_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn destroy_status(&self, id: &str) -> Result<(), PlatformError> {
        self.destroy_calls.lock().unwrap().push(DestroyCall {
            id: id.to_string(),
            at: Instant::now(),
        });

        match self.failures.lock().unwrap().get(id) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let api = MockStatusApi::new();
        api.destroy_status("1").await.unwrap();
        api.destroy_status("2").await.unwrap();

        assert_eq!(api.destroyed_ids(), vec!["1", "2"]);
        assert_eq!(api.destroy_call_count(), 2);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let api = MockStatusApi::new().fail_with_code("2", 404, 144);

        assert!(api.destroy_status("1").await.is_ok());
        let error = api.destroy_status("2").await.unwrap_err();
        assert_eq!(error.api_code(), Some(144));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let api = MockStatusApi::new();
        let handle = api.clone();

        api.destroy_status("9").await.unwrap();
        assert_eq!(handle.destroyed_ids(), vec!["9"]);
    }

    #[tokio::test]
    async fn test_auth_failure() {
        let mut api = MockStatusApi::auth_failure("bad token");
        let error = api.authenticate().await.unwrap_err();

        assert!(matches!(error, PlatformError::Authentication(_)));
        assert_eq!(api.auth_call_count(), 1);
    }
}
