//! Core bootstrap logic.
//!
//! This module contains the provisioning logic and orchestration for a bootstrap.
//!
//! # Modules
//!
//! - [`modules`] - Module archive expansion into the module repository
//! - [`install`] - Install coordination and summary reporting
//!
//! # Install Workflow
//!
//! 1. **Probe**: Check that the remote seed provider answers
//! 2. **Dump**: Use the configured SQL dump or download one
//! 3. **Modules**: Fetch the module archive and expand it into the repository
//! 4. **Seed**: Apply the SQL dump with the database client
//! 5. **Report**: Produce an install summary
//!
//! # Example
//!
//! ```rust,no_run
//! use emr_bootstrap::config::load_config;
//! use emr_bootstrap::core::install::Installer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("bootstrap.toml")?;
//! let installer = Installer::new(config)?;
//!
//! let summary = installer.execute(false).await?;
//!
//! println!("Modules: {}", summary.modules_provisioned.len());
//! println!("Seeded: {}", summary.database_seeded);
//! # Ok(())
//! # }
//! ```

pub mod install;
pub mod modules;
