//! Provision-modules command implementation
//!
//! This module implements the `provision-modules` command, which expands a
//! local module archive or the remote one into the module repository.

use super::{exit_code_for, EXIT_CONFIGURATION, EXIT_FATAL, EXIT_OPERATION_FAILED};
use crate::adapters::remote::RemoteFetcher;
use crate::config::load_config;
use crate::core::modules::ModuleProvisioner;
use crate::domain::BootstrapError;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the provision-modules command
#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// Local zip archive to expand instead of downloading the remote one
    #[arg(short, long)]
    pub archive: Option<PathBuf>,
}

impl ProvisionArgs {
    /// Execute the provision-modules command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIGURATION);
            }
        };

        let provisioner = ModuleProvisioner::from_config(&config.modules);
        println!(
            "📦 Provisioning modules into {}",
            provisioner.repository().display()
        );

        let expanded = match &self.archive {
            Some(path) => {
                tracing::info!(archive = %path.display(), "Expanding local module archive");
                let file = match tokio::fs::File::open(path).await {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("❌ Cannot open {}: {e}", path.display());
                        return Ok(EXIT_OPERATION_FAILED);
                    }
                };
                provisioner.expand_modules(file).await
            }
            None => {
                let endpoint = match config.remote.modules_endpoint() {
                    Ok(e) => e,
                    Err(e) => {
                        eprintln!("Invalid remote configuration: {e}");
                        return Ok(EXIT_CONFIGURATION);
                    }
                };
                let fetcher = match RemoteFetcher::new(config.remote.connect_timeout()) {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("Failed to create HTTP client: {e}");
                        return Ok(EXIT_FATAL);
                    }
                };

                tracing::info!(url = %endpoint.url(), "Downloading module archive");
                match fetcher.fetch_endpoint(&endpoint).await {
                    Ok(stream) => provisioner.expand_modules(stream).await,
                    Err(e) => {
                        eprintln!("❌ Failed to download modules: {e}");
                        return Ok(exit_code_for(&BootstrapError::from(e)));
                    }
                }
            }
        };

        if expanded {
            println!("✅ Modules provisioned");
            Ok(0)
        } else {
            println!("❌ Module provisioning failed, see log for details");
            Ok(EXIT_OPERATION_FAILED)
        }
    }
}
