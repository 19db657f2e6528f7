//! Install command implementation
//!
//! This module implements the `install` command, which runs the whole
//! bootstrap through the install coordinator.

use super::{exit_code_for, EXIT_CONFIGURATION, EXIT_FATAL};
use crate::config::load_config;
use crate::core::install::{InstallSummary, Installer};
use clap::Args;

/// Exit code reported when the run is interrupted (SIGINT convention)
const EXIT_INTERRUPTED: i32 = 130;

/// Arguments for the install command
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Do not download or expand the module archive
    #[arg(long)]
    pub skip_modules: bool,

    /// Print the install summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl InstallArgs {
    /// Execute the install command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting install command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIGURATION);
            }
        };

        if !self.json {
            println!("🚀 Bootstrapping from {}", config.remote.base_url);
            println!(
                "  Database: {}@{}:{}/{}",
                config.database.user,
                config.database.host,
                config.database.port,
                config.database.name
            );
            if self.skip_modules || !config.modules.enabled {
                println!("  Modules: skipped");
            } else {
                println!("  Modules: {}", config.modules.repository_path.display());
            }
            println!();
        }

        let installer = match Installer::new(config) {
            Ok(i) => i,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize installer");
                eprintln!("Failed to initialize installer: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        // Dropping the install future on Ctrl+C deletes temp files and kills the client
        let result = tokio::select! {
            result = installer.execute(self.skip_modules) => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("Received SIGINT (Ctrl+C), aborting install");
                println!("\n⚠️  Install interrupted.");
                return Ok(EXIT_INTERRUPTED);
            }
        };

        let summary = match result {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Install failed");
                eprintln!("❌ Install failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", summary.to_json()?);
        } else {
            print_summary(&summary);
        }

        Ok(0)
    }
}

fn print_summary(summary: &InstallSummary) {
    println!("📊 Install Summary:");
    println!("  Remote reachable: {}", summary.remote_reachable);
    println!("  Modules provisioned: {}", summary.modules_provisioned.len());
    for module in &summary.modules_provisioned {
        println!("    - {module}");
    }
    println!("  Database seeded: {}", summary.database_seeded);
    println!("  Duration: {:.2}s", summary.duration_ms as f64 / 1000.0);
    println!();
    println!("✅ Bootstrap completed successfully!");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_install_missing_config() {
        let args = InstallArgs {
            skip_modules: false,
            json: false,
        };
        let code = args
            .execute("/nonexistent/emr-bootstrap/bootstrap.toml")
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIGURATION);
    }
}
