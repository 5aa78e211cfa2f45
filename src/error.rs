//! Typed error hierarchy for the amc-export crate.
//!
//! `AmcError` has one variant per failure boundary of the export pipeline:
//! the credentials file, the token endpoint, the mower listing, response
//! parsing, the network transport and the output file. The CLI maps each
//! variant onto an exit code and a one-line stderr prefix via
//! [`AmcError::exit_code`] and [`AmcError::category`].
//!
//! Per-mower detail failures are deliberately absent: a non-200 detail
//! response becomes data in the report (see [`crate::mowers::DeviceDetail`]).

use std::path::PathBuf;

use reqwest::StatusCode;

/// Unified error type for all amc-export operations.
#[derive(Debug, thiserror::Error)]
pub enum AmcError {
    /// The credentials file does not exist.
    #[error("no config file at {}", path.display())]
    ConfigNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The credentials file is not valid JSON, or its shape is wrong
    /// (not an object, non-string credential value).
    #[error("invalid JSON in {}: {source}", path.display())]
    ConfigParse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying parser error, with line and column.
        #[source]
        source: serde_json::Error,
    },

    /// A required credential key is missing, `null` or empty.
    #[error("missing key '{key}' in {}", path.display())]
    ConfigIncomplete {
        /// Path of the offending file.
        path: PathBuf,
        /// The first required key that failed validation.
        key: &'static str,
    },

    /// The OAuth2 token endpoint answered with a non-200 status.
    ///
    /// `body` is the raw response text, which usually carries the
    /// provider's own error description (bad client id, bad secret).
    #[error("token request failed ({status}): {body}")]
    TokenRequest {
        /// Status code returned by the token endpoint.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// The token endpoint answered 200 but without a usable `access_token`.
    #[error("token response has no access_token")]
    TokenMissing,

    /// The mower listing endpoint answered with a non-200 status.
    #[error("mower listing failed ({status}): {body}")]
    Listing {
        /// Status code returned by the listing endpoint.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// A 200 response body could not be parsed as the expected JSON.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Transport-level failure: DNS, connect, TLS, or the request timeout.
    ///
    /// No HTTP status is available because no response was received.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// Reading the credentials file or writing the report failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl AmcError {
    /// Process exit code for this error: `2` for network failures,
    /// `1` for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            AmcError::Network(_) => 2,
            _ => 1,
        }
    }

    /// Prefix printed in front of the stderr diagnostic line.
    pub fn category(&self) -> &'static str {
        match self {
            AmcError::Network(_) => "[NETWORK ERROR]",
            AmcError::Io(_) => "[IO ERROR]",
            _ => "[API ERROR]",
        }
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, AmcError>;
