// EMR Bootstrap - Installation bootstrap for EMR deployments
// Copyright (c) 2025 EMR Bootstrap Contributors
// Licensed under the MIT License

//! # EMR Bootstrap
//!
//! EMR Bootstrap seeds a fresh EMR installation for clinics and hospitals in
//! resource-constrained settings: it pulls test data and plugin modules from
//! a remote seed provider and applies them to the local deployment.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Probing** the remote seed provider before any download
//! - **Fetching** authenticated resources with distinct failure kinds
//! - **Provisioning** `.omod` modules from a zip archive into the module repository
//! - **Seeding** the database by driving the external `mysql` client
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (module provisioning, install coordination)
//! - [`adapters`] - External integrations (remote seed provider, database client)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use emr_bootstrap::config::load_config;
//! use emr_bootstrap::core::install::Installer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("bootstrap.toml")?;
//!
//!     let installer = Installer::new(config)?;
//!     let summary = installer.execute(false).await?;
//!
//!     println!("Provisioned {} modules", summary.modules_provisioned.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Components
//!
//! ### Remote Resources
//!
//! The fetcher tells apart rejected credentials, a failing server and a
//! local network problem:
//!
//! ```rust,no_run
//! use emr_bootstrap::adapters::remote::RemoteFetcher;
//! use emr_bootstrap::config::secret_string;
//! use emr_bootstrap::domain::RemoteResourceError;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = RemoteFetcher::with_default_timeout()?;
//! let password = secret_string("Admin123".to_string());
//!
//! match fetcher.fetch("https://seed.example.org/modules", "admin", &password).await {
//!     Ok(stream) => println!("HTTP {}", stream.status()),
//!     Err(RemoteResourceError::AuthFailure(msg)) => eprintln!("Re-enter credentials: {msg}"),
//!     Err(e) => eprintln!("Try again later: {e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Module Provisioning
//!
//! ```rust,no_run
//! use emr_bootstrap::core::modules::{ModuleProvisioner, ProvisionOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provisioner = ModuleProvisioner::new("/var/lib/openmrs/modules", ProvisionOptions::default());
//! let archive = tokio::fs::File::open("modules.zip").await?;
//! let report = provisioner.provision(archive).await?;
//!
//! println!("Provisioned: {:?}", report.module_names());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors use the [`domain::BootstrapError`] type:
//!
//! ```rust,no_run
//! use emr_bootstrap::domain::BootstrapError;
//!
//! fn example() -> Result<(), BootstrapError> {
//!     let config = emr_bootstrap::config::load_config("bootstrap.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Logging uses the `tracing` crate with structured fields:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(repository = "/var/lib/openmrs/modules", "Provisioning modules");
//! warn!(path = "/tmp/modules123", "Failed to delete temporary archive file");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
