//
//  esclient
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Elasticsearch API Client Library
//!
//! A request-building layer for Elasticsearch-style REST APIs, plus the
//! `esc` command-line tool that drives it.
//!
//! ## Overview
//!
//! Every API call goes through the same pipeline:
//!
//! 1. **Normalize** the caller's arguments into parameters and options
//! 2. **Validate** required parameters and the body rule of the endpoint
//! 3. **Map** recognized parameters and aliases onto the querystring
//! 4. **Build** the URL path from the most specific matching template
//! 5. **Dispatch** the resulting descriptor to a transport exactly once
//!
//! Steps 1 to 4 are pure and never perform I/O, so malformed calls fail
//! before anything reaches the network.
//!
//! ## Module Structure
//!
//! - [`api`]: Parameters, endpoint catalog, builders, transports and the client
//! - [`auth`]: Credentials (basic, bearer, API key)
//! - [`config`]: Configuration file management
//! - [`output`]: Output formatting (JSON, YAML, table)
//! - [`cli`]: Command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use esclient::api::{catalog, Client, Params, RequestOptions};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Client::http("http://localhost:9200")?;
//!
//! let params = Params::new()
//!     .set("jobId", "high-cpu")
//!     .set("excludeInterim", true);
//! let options = RequestOptions::new().ignore(404);
//!
//! let records = client.perform(&catalog::ML_GET_RECORDS, (params, options)).await?;
//! println!("{}", records.body());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains the `esc` commands, arguments, and subcommands defined using the
/// clap derive API.
pub mod cli;

/// The request-building pipeline and its collaborators.
///
/// Parameter normalization, querystring mapping, path building, the endpoint
/// catalog, the transport seam and the client that dispatches through it.
pub mod api;

/// Credentials sent with each request.
pub mod auth;

/// Configuration file management.
///
/// Manages the configuration stored in platform-specific locations:
/// - Linux: `~/.config/esc/config.toml`
/// - macOS: `~/Library/Application Support/esc/config.toml`
/// - Windows: `%APPDATA%\esc\config.toml`
pub mod config;

/// Output formatting for different modes.
///
/// - JSON: the default, for scripting and piping into `jq`
/// - YAML: for reading nested responses
/// - Table: human-readable listings
pub mod output;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use esclient::Cli;
///
/// let cli = Cli::parse();
/// // Handle cli.command...
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
///
/// # Example
///
/// ```rust,no_run
/// use esclient::Config;
///
/// let config = Config::load().expect("Failed to load config");
/// if let Some(node) = config.get("node") {
///     println!("Node: {}", node);
/// }
/// ```
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
///
/// # Value
///
/// `"esc"`
pub const APP_NAME: &str = "esc";

/// Application version constant.
///
/// Derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use esclient::VERSION;
///
/// println!("esc version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    ///
    /// # Value
    ///
    /// `0`
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    ///
    /// # Value
    ///
    /// `1`
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    ///
    /// The call was rejected before any request was sent: a missing required
    /// parameter, a body on a body-less endpoint, an unknown endpoint name.
    ///
    /// # Value
    ///
    /// `2`
    pub const USAGE: i32 = 2;

    /// Configuration error.
    ///
    /// The configuration file could not be read or holds invalid values.
    ///
    /// # Value
    ///
    /// `3`
    pub const CONFIGURATION: i32 = 3;

    /// Authentication error.
    ///
    /// The server answered 401 or 403.
    ///
    /// # Value
    ///
    /// `4`
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The server answered 404 and it was not ignored.
    ///
    /// # Value
    ///
    /// `8`
    pub const NOT_FOUND: i32 = 8;

    /// Network error.
    ///
    /// The node could not be reached, or the request timed out.
    ///
    /// # Value
    ///
    /// `32`
    pub const NETWORK: i32 = 32;
}
