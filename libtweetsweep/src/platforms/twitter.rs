//! Twitter v1.1 API client
//!
//! Uses the user-context endpoints with OAuth 1.0a signing:
//! - `GET  1.1/account/verify_credentials.json` to check the session
//! - `POST 1.1/statuses/destroy/:id.json` to delete a tweet

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::{Config, Credentials};
use crate::error::{PlatformError, Result};
use crate::platforms::oauth::OAuthSigner;
use crate::platforms::StatusApi;

const VERIFY_CREDENTIALS_PATH: &str = "1.1/account/verify_credentials.json";

/// Twitter API client for deleting the authenticated user's tweets
pub struct TwitterClient {
    http: Client,
    base_url: String,
    signer: OAuthSigner,
    verify_credentials: bool,
}

impl TwitterClient {
    /// Create a new client
    ///
    /// * `base_url` - API root, e.g. `https://api.twitter.com`
    /// * `credentials` - validated OAuth tokens
    /// * `timeout` - per-request timeout
    pub fn new(base_url: &str, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tweet-sweep/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlatformError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            signer: OAuthSigner::new(credentials),
            verify_credentials: true,
        })
    }

    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if any credential is missing.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = config.credentials()?;
        let mut client = Self::new(
            &config.api.base_url,
            credentials,
            Duration::from_secs(config.api.timeout_secs),
        )?;
        client.verify_credentials = config.api.verify_credentials;
        Ok(client)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send_signed(
        &self,
        method: Method,
        url: &str,
        context: &str,
    ) -> std::result::Result<reqwest::Response, PlatformError> {
        let authorization = self
            .signer
            .authorization_header(method.as_str(), url, &[]);

        self.http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, context))
    }
}

#[async_trait]
impl StatusApi for TwitterClient {
    async fn authenticate(&mut self) -> std::result::Result<(), PlatformError> {
        if !self.verify_credentials {
            debug!("Credential check disabled, skipping verify_credentials");
            return Ok(());
        }

        let url = self.endpoint(VERIFY_CREDENTIALS_PATH);
        let response = self.send_signed(Method::GET, &url, "verify credentials").await?;

        if response.status().is_success() {
            debug!("Twitter credentials verified");
            return Ok(());
        }

        match error_from_response(response).await {
            PlatformError::Api {
                status, message, ..
            } if status == StatusCode::UNAUTHORIZED.as_u16()
                || status == StatusCode::FORBIDDEN.as_u16() =>
            {
                Err(PlatformError::Authentication(format!(
                    "Twitter rejected the credentials (HTTP {}): {}. \
                     Check your API keys and access tokens.",
                    status, message
                )))
            }
            other => Err(other),
        }
    }

    async fn destroy_status(&self, id: &str) -> std::result::Result<(), PlatformError> {
        let url = self.endpoint(&format!(
            "1.1/statuses/destroy/{}.json",
            urlencoding::encode(id)
        ));
        let response = self.send_signed(Method::POST, &url, "destroy status").await?;

        if response.status().is_success() {
            debug!("Deleted tweet {}", id);
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }

    fn name(&self) -> &str {
        "twitter"
    }
}

/// Error payload returned by the v1.1 API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: Option<u32>,
    #[serde(default)]
    message: String,
}

/// Turn a non-success response into `PlatformError::Api`
///
/// The first entry of `{"errors": [{"code": .., "message": ..}]}` is used
/// when present; otherwise the raw body (or the status reason) becomes the
/// message and the code is left empty.
async fn error_from_response(response: reqwest::Response) -> PlatformError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
        if let Some(first) = parsed.errors.into_iter().next() {
            return PlatformError::Api {
                status: status.as_u16(),
                code: first.code,
                message: first.message,
            };
        }
    }

    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.trim().chars().take(200).collect()
    };

    PlatformError::Api {
        status: status.as_u16(),
        code: None,
        message,
    }
}

fn map_reqwest_error(error: reqwest::Error, context: &str) -> PlatformError {
    if error.is_timeout() {
        PlatformError::Network(format!("Timed out during {}: {}", context, error))
    } else {
        PlatformError::Network(format!("Request failed during {}: {}", context, error))
    }
}
