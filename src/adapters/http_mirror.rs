//! HTTP profile mirror adapter.
//!
//! Production [`ProfileMirror`] implementation that mirrors each
//! preference key to the profile service with a bounded per-request
//! timeout. Timeouts are distinguished from other transport failures so
//! the store can record them as such.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::SyncError;
use crate::traits::ProfileMirror;

/// Default URL for the profile service.
pub const PROFILE_SERVICE_URL: &str = "https://profile.tandem.app";

/// Per-request timeout for mirror writes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client mirroring preference values to the profile service.
pub struct HttpProfileMirror {
    /// Base URL for the profile service.
    pub base_url: String,
    client: Client,
    auth_token: Option<String>,
}

impl HttpProfileMirror {
    /// Create a client with the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(PROFILE_SERVICE_URL.to_string())
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            auth_token: None,
        }
    }

    /// Set the authentication token for Bearer auth.
    pub fn with_auth(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    /// Set the authentication token on an existing client.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }
}

impl Default for HttpProfileMirror {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileMirror for HttpProfileMirror {
    /// PUT /v1/preferences/{key}
    async fn set_remote(&self, key: &str, value: &Value) -> Result<(), SyncError> {
        let url = format!("{}/v1/preferences/{}", self.base_url, key);
        let mut builder = self.client.put(&url).json(value);
        if let Some(ref token) = self.auth_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                SyncError::Timeout
            } else {
                SyncError::RemoteWriteFailed {
                    message: e.to_string(),
                }
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::RemoteWriteFailed {
                message: if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    format!("HTTP {}: {}", status, body.trim())
                },
            });
        }
        Ok(())
    }
}
