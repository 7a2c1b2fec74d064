//! HTTP identity service adapter.
//!
//! Production [`IdentityService`] implementation over the identity
//! service's JSON endpoints, mapping transport and server failures into
//! the [`AuthError`] taxonomy with the server's message kept verbatim.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::models::Profile;
use crate::traits::IdentityService;

/// Default URL for the identity service.
pub const IDENTITY_SERVICE_URL: &str = "https://identity.tandem.app";

#[derive(Serialize)]
struct SignInRequest<'a> {
    identifier: &'a str,
    secret: &'a str,
}

#[derive(Serialize)]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Error payload the identity service returns on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Extract the service's error message from a response body, falling
/// back to the raw body (or the status code) when it isn't the expected
/// JSON shape.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message {
            return message;
        }
    }
    if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        body.trim().to_string()
    }
}

/// Map a non-success response into an [`AuthError`].
fn map_status(status: u16, body: &str) -> AuthError {
    let message = error_message(status, body);
    match status {
        401 | 403 => AuthError::InvalidCredentials { message },
        _ => AuthError::Unknown { message },
    }
}

/// Client for the identity service's sign-in and password endpoints.
pub struct HttpIdentityService {
    /// Base URL for the identity service.
    pub base_url: String,
    /// Reusable HTTP client.
    client: Client,
    /// Optional authentication token for Bearer auth.
    auth_token: Option<String>,
}

impl HttpIdentityService {
    /// Create a client with the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(IDENTITY_SERVICE_URL.to_string())
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
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

    fn add_auth_header(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref token) = self.auth_token {
            builder.header("Authorization", format!("Bearer {}", token))
        } else {
            builder
        }
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, AuthError> {
        let url = format!("{}{}", self.base_url, path);
        self.add_auth_header(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::NetworkFailure {
                message: e.to_string(),
            })
    }
}

impl Default for HttpIdentityService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    /// POST /v1/session
    async fn sign_in(&self, identifier: &str, secret: &str) -> Result<Profile, AuthError> {
        let response = self
            .post_json("/v1/session", &SignInRequest { identifier, secret })
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, &body));
        }

        response
            .json::<Profile>()
            .await
            .map_err(|e| AuthError::Unknown {
                message: format!("invalid profile payload: {}", e),
            })
    }

    /// POST /v1/session/password
    async fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        let response = self
            .post_json(
                "/v1/session/password",
                &ChangePasswordRequest {
                    current_password: current,
                    new_password: new,
                },
            )
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, &body));
        }
        Ok(())
    }
}
