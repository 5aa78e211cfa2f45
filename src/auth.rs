//! OAuth2 client-credentials authentication for the Husqvarna auth service.
//!
//! Exchanges the application key and secret for a bearer token at
//! `{auth_base}/oauth2/token`. The token lives for one process run: it is
//! neither cached on disk nor refreshed.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::client::Endpoints;
use crate::config::Credentials;
use crate::error::{AmcError, Result};

/// Form body sent to the token endpoint.
/// Serialized as `application/x-www-form-urlencoded` by reqwest's `.form()`.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// Subset of the token response that we need. Husqvarna also returns
/// `scope`, `expires_in`, `provider`, `user_id` and `token_type`, which
/// are ignored.
#[derive(Deserialize)]
pub struct TokenResponse {
    /// Bearer token, when the provider sent one.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Bearer token for the current run.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps an already issued token.
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(token.into())
    }

    /// Raw token value for the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Performs the client-credentials grant.
pub struct TokenProvider {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl TokenProvider {
    /// Creates a provider for the token endpoint of `endpoints`.
    pub fn new(client: Client, endpoints: &Endpoints, credentials: &Credentials) -> Self {
        TokenProvider {
            client,
            token_url: endpoints.token_url(),
            client_id: credentials.app_key.clone(),
            client_secret: credentials.app_secret.clone(),
        }
    }

    /// Requests a token. One outbound call, no retries.
    ///
    /// The body is read as text before the status check so that the
    /// provider's error description survives in `AmcError::TokenRequest`.
    ///
    /// # Errors
    ///
    /// - `AmcError::TokenRequest` — any status other than 200.
    /// - `AmcError::TokenMissing` — 200 without a non-empty `access_token`.
    /// - `AmcError::Parse` — 200 with a body that is not a JSON object.
    /// - `AmcError::Network` — transport failure or timeout.
    pub async fn acquire(&self) -> Result<AccessToken> {
        let form = TokenRequest {
            grant_type: "client_credentials",
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        };

        tracing::debug!(url = %self.token_url, "requesting access token");
        let response = self.client.post(&self.token_url).form(&form).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(AmcError::TokenRequest { status, body });
        }

        let resp: TokenResponse = serde_json::from_str(&body)?;
        match resp.access_token {
            Some(token) if !token.is_empty() => {
                tracing::info!("access token acquired");
                Ok(AccessToken(token))
            }
            _ => Err(AmcError::TokenMissing),
        }
    }
}
