//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the bootstrap using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// EMR Bootstrap - seed a fresh EMR installation
#[derive(Parser, Debug)]
#[command(name = "emr-bootstrap")]
#[command(version, about, long_about = None)]
#[command(author = "EMR Bootstrap Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "bootstrap.toml", env = "BOOTSTRAP_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BOOTSTRAP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full bootstrap: probe, download, provision modules, seed database
    Install(commands::install::InstallArgs),

    /// Check whether the remote seed provider is reachable
    Probe(commands::probe::ProbeArgs),

    /// Expand a module archive into the module repository
    ProvisionModules(commands::provision::ProvisionArgs),

    /// Apply a SQL dump with the database client
    SeedDatabase(commands::seed::SeedArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
