//
//  esclient
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Command-Line Interface
//!
//! The `esc` command tree, built with clap's derive API.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `esc request <endpoint>` | Build and send a catalog request, or print it with `--dry-run` |
//! | `esc endpoints [FILTER]` | List catalog endpoints |
//! | `esc config ...` | Read and write the configuration file |
//! | `esc completion <shell>` | Shell completion scripts |
//! | `esc version` | Version information |
//!
//! ## Global Options
//!
//! | Flag | Environment | Meaning |
//! |------|-------------|---------|
//! | `--node` | `ESC_NODE` | Node URL, overriding the configuration |
//! | `--config` | `ESC_CONFIG` | Configuration file path |
//! | `--output` | | `json` (default), `yaml` or `table` |

mod completion;
mod config;
mod endpoints;
mod request;

pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use endpoints::EndpointsCommand;
pub use request::RequestCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

/// Root command.
#[derive(Parser, Debug)]
#[command(
    name = "esc",
    version,
    about = "Build and send Elasticsearch API requests",
    long_about = "esc builds Elasticsearch REST requests from a catalog of endpoint descriptors.\n\n\
                  Parameters are validated and mapped before anything is sent; use --dry-run to \
                  inspect the request without contacting a node.",
    propagate_version = true,
    after_help = "Use 'esc <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Node URL (overrides client.node from the config file)
    #[arg(long, global = true, env = "ESC_NODE")]
    pub node: Option<String>,

    /// Configuration file path
    #[arg(long, global = true, env = "ESC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

impl GlobalOptions {
    /// Path of the configuration file in effect.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    /// Loads the configuration file in effect.
    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    /// Output writer for the selected format.
    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(self.output)
    }
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and send a request to a catalog endpoint
    #[command(visible_alias = "req")]
    Request(RequestCommand),

    /// List the endpoints in the catalog
    #[command(visible_alias = "ls")]
    Endpoints(EndpointsCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Show version information
    Version,
}
