//! Authenticated HTTP client for the Automower Connect API.
//!
//! `AmcClient` wraps a `reqwest::Client`, the API base URL, the application
//! key and a bearer token, and attaches the header set every AMC request
//! needs:
//!
//! - `Authorization: Bearer <token>`
//! - `X-Api-Key: <app_key>`
//! - `Authorization-Provider: husqvarna`
//! - `Accept: application/vnd.api+json` (the API rejects plain `application/json`)
//!
//! Unlike a typical JSON helper, [`AmcClient::get`] does not turn non-2xx
//! statuses into errors. Callers decide: the mower listing treats them as
//! fatal, the per-mower detail fetch records them in the report.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};

use crate::auth::AccessToken;
use crate::error::Result;

/// Production base URL of the Husqvarna authentication service.
pub const AUTH_BASE_URL: &str = "https://api.authentication.husqvarnagroup.dev/v1";

/// Production base URL of the Automower Connect API.
pub const API_BASE_URL: &str = "https://api.amc.husqvarna.dev/v1";

/// Total timeout applied to every request (connect, send, and body download).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Media type required by the AMC API.
const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Base URLs of the two upstream services.
///
/// Passed explicitly into every component so tests can redirect all traffic
/// to a mock server. Trailing slashes are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    auth_base: String,
    api_base: String,
}

impl Endpoints {
    /// Creates endpoints from explicit base URLs.
    pub fn new(auth_base: &str, api_base: &str) -> Self {
        Endpoints {
            auth_base: auth_base.trim_end_matches('/').to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// OAuth2 token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.auth_base)
    }

    /// Mower listing endpoint.
    pub fn mowers_url(&self) -> String {
        format!("{}/mowers", self.api_base)
    }

    /// Detail endpoint for a single mower.
    pub fn mower_url(&self, mower_id: &str) -> String {
        format!("{}/mowers/{mower_id}", self.api_base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints::new(AUTH_BASE_URL, API_BASE_URL)
    }
}

/// Builds the `reqwest::Client` shared by the token request and API calls.
pub fn build_http_client() -> Result<Client> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Status and raw body of a completed API request.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

impl ApiResponse {
    /// `true` for exactly `200 OK`. Other 2xx codes are not what the AMC
    /// endpoints return on success and are treated as failures.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// Authenticated HTTP client for the AMC REST API.
pub struct AmcClient {
    client: Client,
    endpoints: Endpoints,
    app_key: String,
    token: AccessToken,
}

impl AmcClient {
    /// Creates a client that authenticates every request with `token`.
    pub fn new(client: Client, endpoints: Endpoints, app_key: &str, token: AccessToken) -> Self {
        AmcClient {
            client,
            endpoints,
            app_key: app_key.to_string(),
            token,
        }
    }

    /// Endpoints this client talks to.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Sends an authenticated GET to `url` and returns status and body.
    ///
    /// Only transport failures are errors here; every HTTP status comes
    /// back as an [`ApiResponse`].
    pub async fn get(&self, url: &str) -> Result<ApiResponse> {
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .bearer_auth(self.token.as_str())
            .header("X-Api-Key", &self.app_key)
            .header("Authorization-Provider", "husqvarna")
            .header(ACCEPT, JSON_API_MEDIA_TYPE)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "response");
        Ok(ApiResponse { status, body })
    }
}
