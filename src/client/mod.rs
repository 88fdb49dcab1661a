//! # FatSecret HTTP Client
//!
//! This module signs requests for the FatSecret Platform REST API, sends
//! them, and normalizes the JSON that comes back into typed records.
//!
//! ## Modules
//!
//! - [`encoding`] - OAuth percent-encoding and canonical parameter strings
//! - [`auth`] - OAuth 1.0a HMAC-SHA1 request signing
//! - [`request`] - Signed request URLs for each API method
//! - [`transport`] - The send-and-receive seam and its reqwest implementation
//! - [`normalize`] - Tolerant conversion of response JSON into domain types
//! - [`client`] - Main client tying the above together
//! - [`types`] - Domain model
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcp_fatsecret::client::{FatsecretClient, Localization};
//!
//! # async fn example() -> mcp_fatsecret::Result<()> {
//! let client = FatsecretClient::new("consumer key", "consumer secret");
//!
//! let page = client.search_foods("penne", 0, &Localization::default()).await?;
//! println!("Found {} foods", page.total_results);
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod encoding;
pub mod normalize;
pub mod request;
pub mod transport;
pub mod types;

pub use client::FatsecretClient;
pub use request::{FoodGetOptions, Localization, RequestDescriptor};
pub use types::*;
