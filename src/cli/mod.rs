//! Command-line interface for stms-mcp.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::config::{DEFAULT_CONFIG_FILE, STAGING_COOKIE_ENV, STAGING_URL_ENV};

/// stms-mcp - MCP adapter for the STMS staging API.
#[derive(Parser, Debug)]
#[command(name = "stms-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Base URL of the staging API.
    #[arg(long, env = STAGING_URL_ENV, global = true)]
    pub staging_url: Option<String>,

    /// Session cookie sent with every request.
    #[arg(long, env = STAGING_COOKIE_ENV, global = true, hide_env_values = true)]
    pub cookie: Option<String>,

    /// Command to run (defaults to `serve`).
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Writes a default configuration file.
    Init {
        /// Target directory (default: current directory).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Runs the MCP server on stdin/stdout.
    Serve,

    /// Lists the tool catalog.
    Tools,

    /// Invokes one tool directly and prints the result.
    Call {
        /// Tool name, e.g. `whoami`.
        tool: String,

        /// Tool arguments as a JSON object.
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Checks configuration and staging connectivity.
    Doctor,

    /// Shows version.
    Version,
}
