//
//  esclient
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `esc config`: read and write the configuration file.
//!
//! ```bash
//! esc config set node https://search.example.com:9200
//! esc config set auth.api_key "$ES_API_KEY"
//! esc config set headers.x-opaque-id nightly-report
//! esc config get node
//! esc config list -o table
//! ```

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{TableBuilder, TableOutput};

use super::GlobalOptions;

/// Manage configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Remove a configuration value
    Unset(UnsetArgs),

    /// List configuration values (secrets masked)
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Key, e.g. node, max_retries, auth.username, headers.x-opaque-id
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Key to set
    pub key: String,

    /// New value
    pub value: String,
}

#[derive(Args, Debug)]
pub struct UnsetArgs {
    /// Key to remove
    pub key: String,
}

#[derive(Debug, Serialize)]
struct Entry {
    key: String,
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct Entries(Vec<Entry>);

impl TableOutput for Entries {
    fn print_table(&self, color: bool) {
        let mut table = TableBuilder::new().color(color).headers(["KEY", "VALUE"]);
        for entry in &self.0 {
            table = table.row([entry.key.as_str(), entry.value.as_str()]);
        }
        table.print();
    }
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => {
                println!("{}", global.config_path()?.display());
                Ok(())
            }
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        match config.get(&args.key) {
            Some(value) => {
                println!("{}", value);
                Ok(())
            }
            None => bail!("'{}' is not set", args.key),
        }
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let mut config = global.load_config()?;
        config.set(&args.key, &args.value)?;
        config.save_to(&path)?;

        tracing::debug!(key = %args.key, path = %path.display(), "configuration updated");
        global.writer().write_success(&format!("Set {}", args.key));
        Ok(())
    }

    fn unset(&self, args: &UnsetArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let mut config = global.load_config()?;
        config.unset(&args.key)?;
        config.save_to(&path)?;

        global.writer().write_success(&format!("Unset {}", args.key));
        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let entries = Entries(
            config
                .entries()
                .into_iter()
                .map(|(key, value)| Entry { key, value })
                .collect(),
        );
        global.writer().write(&entries)
    }
}
