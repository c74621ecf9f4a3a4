//
//  esclient
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! | Format | Used for |
//! |--------|----------|
//! | `json` (default) | Response bodies, descriptors, scripting |
//! | `yaml` | Human-readable structured output |
//! | `table` | Listings such as `esc endpoints` and `esc config list` |
//!
//! Values without a table form fall back to JSON when `table` is selected.
//! Diagnostics (warnings, errors) always go to stderr.

mod json;
mod table;

pub use json::*;
pub use table::*;

use std::io;

use clap::ValueEnum;
use serde::Serialize;

/// Output format selected with `--output`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
    /// Tables where available.
    Table,
}

/// Values that know how to render themselves as a table.
pub trait TableOutput {
    /// Prints the value as a table to stdout.
    fn print_table(&self, color: bool);
}

/// Writes command results in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Writes a value that has a table form.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                value.print_table(self.color);
                Ok(())
            }
            _ => self.write_data(value),
        }
    }

    /// Writes structured data; `table` falls back to JSON.
    pub fn write_data<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        match self.format {
            OutputFormat::Yaml => write_yaml_to(&mut handle, value),
            OutputFormat::Json | OutputFormat::Table => write_json_to(&mut handle, value),
        }
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}
