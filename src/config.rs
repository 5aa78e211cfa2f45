//! Credentials file loading.
//!
//! The file is a JSON object holding the application key and secret issued
//! by the Husqvarna developer portal:
//!
//! ```json
//! { "app_key": "...", "app_secret": "..." }
//! ```
//!
//! Additional keys are ignored. Both credentials must be present and
//! non-empty.

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AmcError, Result};

/// Path used when the CLI is invoked without a config argument.
pub const DEFAULT_CONFIG_PATH: &str = "./config.json";

/// Application credentials for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Application key. Doubles as the OAuth2 `client_id` and the
    /// `X-Api-Key` header value.
    pub app_key: String,
    /// Application secret, used only for the token request.
    pub app_secret: String,
}

// The secret must never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Raw file shape before validation. `null` and a missing key both
/// deserialize to `None`.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    app_key: Option<String>,
    #[serde(default)]
    app_secret: Option<String>,
}

/// Reads and validates the credentials file at `path`.
///
/// # Errors
///
/// - `AmcError::ConfigNotFound` — `path` does not exist.
/// - `AmcError::ConfigParse` — content is not a JSON object with string values.
/// - `AmcError::ConfigIncomplete` — `app_key` or `app_secret` missing or empty.
/// - `AmcError::Io` — any other read failure.
pub fn load_credentials(path: &Path) -> Result<Credentials> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AmcError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(AmcError::Io(e)),
    };

    let raw: RawConfig =
        serde_json::from_str(&content).map_err(|source| AmcError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    let app_key = require(path, "app_key", raw.app_key)?;
    let app_secret = require(path, "app_secret", raw.app_secret)?;
    tracing::debug!(path = %path.display(), "loaded credentials");

    Ok(Credentials {
        app_key,
        app_secret,
    })
}

fn require(path: &Path, key: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AmcError::ConfigIncomplete {
            path: path.to_path_buf(),
            key,
        }),
    }
}
