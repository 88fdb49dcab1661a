//! # FatSecret MCP Library
//!
//! This library connects to the FatSecret Platform nutrition API and exposes
//! it through the Model Context Protocol (MCP). It consists of two main
//! components:
//!
//! ## Client Module
//!
//! The [`client`] module signs requests with OAuth 1.0a (HMAC-SHA1), sends
//! them, and normalizes FatSecret's loosely shaped JSON into typed foods,
//! servings and recipes.
//!
//! ## Server Module
//!
//! The [`server`] module implements an MCP server that exposes the food and
//! recipe lookups as tools AI assistants can call.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcp_fatsecret::{FatsecretClient, FatsecretMcpServer};
//!
//! // Use the client directly
//! let client = FatsecretClient::new("consumer key", "consumer secret");
//!
//! // Or create an MCP server around one
//! let server = FatsecretMcpServer::new(client);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod server;

pub use client::FatsecretClient;
pub use config::FatsecretConfig;
pub use error::{FatsecretError, Result};
pub use server::FatsecretMcpServer;
