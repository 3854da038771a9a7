//! # stms-mcp
//!
//! MCP adapter for the STMS staging REST API.
//!
//! Every tool maps onto one HTTP endpoint; responses come back as a
//! normalized envelope (`status_code` + `data`, or `error` + `raw_text`).
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface
//! - [`mcp`] - MCP server (JSON-RPC over stdio)
//! - [`catalog`] - Tool catalog and argument handling
//! - [`client`] - HTTP client and response normalization
//! - [`types`] - Configuration and errors

pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod mcp;
pub mod types;

pub use types::config::Config;
pub use types::errors::{StmsError, StmsResult};
