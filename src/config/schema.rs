//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use crate::config::SecretString;
use crate::domain::{DatabaseTarget, RemoteEndpoint};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Main bootstrap configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Remote seed provider
    pub remote: RemoteConfig,

    /// Database server to seed
    pub database: DatabaseConfig,

    /// Module repository settings
    pub modules: ModulesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BootstrapConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.remote.validate()?;
        self.database.validate()?;
        self.modules.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Remote seed provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the remote server, probed before any download
    pub base_url: String,

    /// Username sent (Base64-encoded) with every fetch
    pub username: String,

    /// Password sent (Base64-encoded) with every fetch
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Path, relative to `base_url`, that generates the SQL dump
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Path, relative to `base_url`, that serves the zipped modules
    #[serde(default = "default_modules_path")]
    pub modules_path: String,

    /// Connect timeout in seconds for probe and fetch
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

impl RemoteConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("remote.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("remote.base_url must start with http:// or https://".to_string());
        }

        Url::parse(&self.base_url)
            .map_err(|e| format!("remote.base_url is not a valid URL: {e}"))?;

        if self.username.is_empty() {
            return Err("remote.username cannot be empty".to_string());
        }

        if self.connect_timeout_seconds == 0 {
            return Err("remote.connect_timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }

    /// Connect timeout as a Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Endpoint generating the SQL dump
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be joined
    pub fn database_endpoint(&self) -> Result<RemoteEndpoint, String> {
        self.endpoint(&self.database_path)
    }

    /// Endpoint serving the zipped modules
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be joined
    pub fn modules_endpoint(&self) -> Result<RemoteEndpoint, String> {
        self.endpoint(&self.modules_path)
    }

    fn endpoint(&self, path: &str) -> Result<RemoteEndpoint, String> {
        let url = join_url(&self.base_url, path)?;
        RemoteEndpoint::new(url, self.username.clone(), self.password.clone())
    }
}

/// Joins a relative resource path onto a base URL
///
/// The base is treated as a directory even when it lacks a trailing slash.
fn join_url(base: &str, path: &str) -> Result<String, String> {
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    let base = Url::parse(&base).map_err(|e| format!("Invalid base URL '{base}': {e}"))?;
    let joined = base
        .join(path.trim_start_matches('/'))
        .map_err(|e| format!("Invalid resource path '{path}': {e}"))?;
    Ok(joined.to_string())
}

/// Database server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host
    pub host: String,

    /// Database port
    #[serde(default = "default_database_port")]
    pub port: u16,

    /// Database name
    pub name: String,

    /// Database user
    pub user: String,

    /// Database password
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Client executable, resolved on PATH unless absolute
    #[serde(default = "default_client_binary")]
    pub client_binary: String,

    /// Local SQL dump; when set the remote dump is not downloaded
    #[serde(default)]
    pub dump_file: Option<PathBuf>,
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("database.host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("database.port must be > 0".to_string());
        }

        if self.name.is_empty() {
            return Err("database.name cannot be empty".to_string());
        }

        if self.user.is_empty() {
            return Err("database.user cannot be empty".to_string());
        }

        if self.client_binary.is_empty() {
            return Err("database.client_binary cannot be empty".to_string());
        }

        Ok(())
    }

    /// Builds the seeding target for the given dump
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is blank
    pub fn target(&self, dump_file_path: impl AsRef<Path>) -> Result<DatabaseTarget, String> {
        DatabaseTarget::builder()
            .host(self.host.clone())
            .port(self.port)
            .database_name(self.name.clone())
            .user(self.user.clone())
            .password(self.password.clone())
            .dump_file_path(dump_file_path.as_ref())
            .build()
    }
}

/// Module repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulesConfig {
    /// Download and expand modules during install
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory the platform scans for `.omod` files
    pub repository_path: PathBuf,

    /// Accept `.OMOD` and other casings of the suffix
    #[serde(default)]
    pub case_insensitive_suffix: bool,

    /// Directory for the temporary archive copy (system default when unset)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl ModulesConfig {
    fn validate(&self) -> Result<(), String> {
        if self.repository_path.as_os_str().is_empty() {
            return Err("modules.repository_path cannot be empty".to_string());
        }

        if self.repository_path.is_file() {
            return Err(format!(
                "modules.repository_path '{}' is a file, expected a directory",
                self.repository_path.display()
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_database_path() -> String {
    "module/testing/generateTestDatabase.form".to_string()
}

fn default_modules_path() -> String {
    "module/testing/getModules.htm".to_string()
}

fn default_connect_timeout_seconds() -> u64 {
    15
}

fn default_database_port() -> u16 {
    3306
}

fn default_client_binary() -> String {
    "mysql".to_string()
}

fn default_local_path() -> String {
    "/var/log/emr-bootstrap".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn remote_config() -> RemoteConfig {
        RemoteConfig {
            base_url: "https://seed.example.org/openmrs".to_string(),
            username: "admin".to_string(),
            password: secret_string("Admin123".to_string()),
            database_path: default_database_path(),
            modules_path: default_modules_path(),
            connect_timeout_seconds: 15,
        }
    }

    fn database_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "localhost".to_string(),
            port: 3306,
            name: "openmrs".to_string(),
            user: "openmrs".to_string(),
            password: secret_string("pw".to_string()),
            client_binary: "mysql".to_string(),
            dump_file: None,
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_remote_config_validation() {
        let mut config = remote_config();
        assert!(config.validate().is_ok());

        config.base_url = "ftp://seed.example.org".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://seed.example.org".to_string();
        config.username = String::new();
        assert!(config.validate().is_err());

        config.username = "admin".to_string();
        config.connect_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_remote_endpoints_join_base() {
        let config = remote_config();
        let database = config.database_endpoint().unwrap();
        assert_eq!(
            database.url(),
            "https://seed.example.org/openmrs/module/testing/generateTestDatabase.form"
        );

        let modules = config.modules_endpoint().unwrap();
        assert_eq!(
            modules.url(),
            "https://seed.example.org/openmrs/module/testing/getModules.htm"
        );
        assert_eq!(modules.username(), "admin");
    }

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(
            join_url("http://host/app/", "/path/x").unwrap(),
            "http://host/app/path/x"
        );
        assert_eq!(join_url("http://host", "x").unwrap(), "http://host/x");
    }

    #[test]
    fn test_database_config_validation() {
        let mut config = database_config();
        assert!(config.validate().is_ok());

        config.port = 0;
        assert!(config.validate().is_err());

        config.port = 3306;
        config.client_binary = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_config_target() {
        let target = database_config().target("/tmp/d.sql").unwrap();
        assert_eq!(target.host(), "localhost");
        assert_eq!(target.database_name(), "openmrs");
        assert_eq!(target.dump_file_path(), Path::new("/tmp/d.sql"));
    }

    #[test]
    fn test_modules_config_rejects_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = ModulesConfig {
            enabled: true,
            repository_path: file.path().to_path_buf(),
            case_insensitive_suffix: false,
            temp_dir: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "/var/log/emr-bootstrap");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_invalid_rotation() {
        let config = LoggingConfig {
            local_rotation: "weekly".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_connect_timeout_seconds(), 15);
        assert_eq!(default_database_port(), 3306);
        assert_eq!(default_client_binary(), "mysql");
    }
}
