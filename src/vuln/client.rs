//! HTTP client for the advisory service
//!
//! Thin wrapper over `reqwest` with a fixed timeout and User-Agent. Lookups are
//! best-effort, so there is no retry.

use crate::error::VulnError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("faro/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, VulnError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, VulnError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| VulnError::network("", format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<B, T>(&self, url: &str, body: &B, package: &str) -> Result<T, VulnError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VulnError::network(package, "request timed out")
                } else {
                    VulnError::network(package, e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(VulnError::network(package, format!("HTTP {}", status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| VulnError::invalid_response(package, format!("failed to parse JSON: {}", e)))
    }
}
