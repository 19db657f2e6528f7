//! Probe command implementation
//!
//! This module implements the `probe` command, a reachability check
//! against a URL or the configured remote base URL.

use super::{EXIT_CONFIGURATION, EXIT_FATAL, EXIT_OPERATION_FAILED};
use crate::adapters::remote::{ReachabilityProber, DEFAULT_CONNECT_TIMEOUT};
use crate::config::load_config;
use clap::Args;

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// URL to probe (defaults to remote.base_url from the configuration)
    pub url: Option<String>,
}

impl ProbeArgs {
    /// Execute the probe command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (url, timeout) = match &self.url {
            Some(url) => (url.clone(), DEFAULT_CONNECT_TIMEOUT),
            None => match load_config(config_path) {
                Ok(config) => (
                    config.remote.base_url.clone(),
                    config.remote.connect_timeout(),
                ),
                Err(e) => {
                    eprintln!("Failed to load configuration: {e}");
                    return Ok(EXIT_CONFIGURATION);
                }
            },
        };

        tracing::info!(url = %url, "Probing remote server");

        let prober = match ReachabilityProber::new(timeout) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Failed to create HTTP client: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        if prober.probe(&url).await {
            println!("✅ {url} is reachable");
            Ok(0)
        } else {
            println!("❌ {url} is not reachable");
            Ok(EXIT_OPERATION_FAILED)
        }
    }
}
