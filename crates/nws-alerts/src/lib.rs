//! National Weather Service alert source.
//!
//! Fetches active alerts for a two-letter area code from
//! `api.weather.gov` and normalizes them into a [`grid_core::AlertReport`].
//! The NWS API is free and needs no key, but requires a descriptive
//! `User-Agent`.
//!
//! # Example
//!
//! ```rust,no_run
//! use grid_core::AlertSource;
//! use nws_alerts::{NwsAlertClient, NwsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NwsAlertClient::new(NwsConfig::from_env())?;
//!     let report = client.fetch_alerts("tx").await?;
//!     println!("{}: {}", report.region, report.headline_event);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod normalize;

pub use client::NwsAlertClient;
pub use config::{NwsConfig, NwsConfigBuilder, DEFAULT_API_URL, DEFAULT_MAX_ALERTS, DEFAULT_USER_AGENT};
pub use normalize::{format_nws_time, normalize_alerts};
