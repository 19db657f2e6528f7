//! Configuration management for the bootstrap tool.
//!
//! # Overview
//!
//! Configuration lives in a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `BOOTSTRAP_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! The bootstrap components never read the environment themselves; everything
//! they need is resolved here and passed in explicitly.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use emr_bootstrap::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("bootstrap.toml")?;
//!
//! println!("Remote: {}", config.remote.base_url);
//! println!("Module repository: {}", config.modules.repository_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`RemoteConfig`] - Remote seed provider and credentials
//! - [`DatabaseConfig`] - Database server, client binary, optional local dump
//! - [`ModulesConfig`] - Module repository and suffix matching
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [remote]
//! base_url = "https://seed.example.org/openmrs/"
//! username = "${BOOTSTRAP_REMOTE_USERNAME}"
//! password = "${BOOTSTRAP_REMOTE_PASSWORD}"
//!
//! [database]
//! host = "localhost"
//! port = 3306
//! name = "openmrs"
//! user = "openmrs"
//! password = "${BOOTSTRAP_DATABASE_PASSWORD}"
//!
//! [modules]
//! repository_path = "/var/lib/openmrs/modules"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, BootstrapConfig, DatabaseConfig, LoggingConfig, ModulesConfig,
    RemoteConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
