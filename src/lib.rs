//! Exporter for the Husqvarna Automower Connect (AMC) cloud API.
//!
//! Authenticates with OAuth2 client credentials, lists the mowers on the
//! account, fetches each mower's detail record and writes everything to a
//! single timestamped JSON report.
//!
//! # Modules
//!
//! - [`auth`] — OAuth2 client-credentials token acquisition.
//! - [`client`] — Endpoint configuration and the authenticated HTTP wrapper.
//! - [`config`] — Credentials file loading and validation.
//! - [`error`] — Typed error hierarchy (`AmcError`) and exit-code mapping.
//! - [`export`] — The end-to-end pipeline.
//! - [`mowers`] — Mower listing and per-mower detail lookup.
//! - [`report`] — Report entries and JSON serialization.
//!
//! # Quick Start
//!
//! ```ignore
//! use amc_export::export::{ExportOptions, run};
//!
//! let entries = run(&ExportOptions::default()).await?;
//! println!("exported {} mowers", entries.len());
//! ```

#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod mowers;
pub mod report;
