// Vaxdesk - Vaccination Appointment Desk
// Copyright (c) 2025 Vaxdesk Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use vaxdesk::cli::{Cli, Commands};
use vaxdesk::config::load_config;
use vaxdesk::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging and the default level come from the config file when it
    // loads; commands report configuration errors themselves
    let file_config = load_config(&cli.config).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| {
            file_config
                .as_ref()
                .map(|c| c.application.log_level.clone())
        })
        .unwrap_or_else(|| "info".to_string());
    let logging_config = file_config.map(|c| c.logging).unwrap_or_default();

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Vaxdesk - Vaccination Appointment Desk"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Add(args) => args.execute(&cli.config).await,
        Commands::Options(args) => args.execute(&cli.config).await,
        Commands::Records(args) => args.execute(&cli.config).await,
        Commands::Login(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
