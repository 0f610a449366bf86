//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Vaxdesk using clap.
//! The terminal acts as the display surface for the selection controller.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Vaxdesk - vaccination appointment desk
#[derive(Parser, Debug)]
#[command(name = "vaxdesk")]
#[command(version, about, long_about = None)]
#[command(author = "Vaxdesk Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "vaxdesk.toml", env = "VAXDESK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VAXDESK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select location, centre, patient and slot, then submit the record
    Add(commands::add::AddArgs),

    /// List the options available at each level of a partial selection
    Options(commands::options::OptionsArgs),

    /// Show submitted vaccination records
    Records(commands::records::RecordsArgs),

    /// Verify credentials against the token endpoint
    Login(commands::login::LoginArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
