//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the bootstrap configuration file.

use super::EXIT_CONFIGURATION;
use crate::config::{load_config, BootstrapConfig};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print_summary(&config);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIGURATION)
            }
        }
    }
}

fn print_summary(config: &BootstrapConfig) {
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Remote Server: {}", config.remote.base_url);
    println!("  Remote User: {}", config.remote.username);
    println!(
        "  Remote Password: {}",
        password_state(config.remote.password.expose_secret().is_empty())
    );
    println!(
        "  Connect Timeout: {}s",
        config.remote.connect_timeout_seconds
    );
    println!(
        "  Database: {}@{}:{}/{}",
        config.database.user, config.database.host, config.database.port, config.database.name
    );
    println!(
        "  Database Password: {}",
        password_state(config.database.password.expose_secret().is_empty())
    );
    println!("  Client Binary: {}", config.database.client_binary);
    match &config.database.dump_file {
        Some(path) => println!("  SQL Dump: {}", path.display()),
        None => println!("  SQL Dump: downloaded from remote"),
    }
    println!("  Modules Enabled: {}", config.modules.enabled);
    println!(
        "  Module Repository: {}",
        config.modules.repository_path.display()
    );
    println!(
        "  Case-insensitive Suffix: {}",
        config.modules.case_insensitive_suffix
    );
    if config.logging.local_enabled {
        println!(
            "  File Logging: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        );
    }
    println!();
}

fn password_state(is_empty: bool) -> &'static str {
    if is_empty {
        "(empty)"
    } else {
        "(set)"
    }
}
