//
//  esclient
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use esclient::api::ApiError;
use esclient::cli::{Cli, Commands};
use esclient::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("ESC_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Request(cmd) => cmd.run(&cli.global).await,
        Commands::Endpoints(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("esc version {}", esclient::VERSION);
            Ok(())
        }
    }
}

/// Picks the exit code for a failed command
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Configuration(_)) => exit_codes::USAGE,
        Some(ApiError::Network(_)) => exit_codes::NETWORK,
        Some(api) => match api.status() {
            Some(401) | Some(403) => exit_codes::AUTH_ERROR,
            Some(404) => exit_codes::NOT_FOUND,
            _ => exit_codes::ERROR,
        },
        None => exit_codes::ERROR,
    }
}
