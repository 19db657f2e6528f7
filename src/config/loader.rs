//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BootstrapConfig;
use super::secret::secret_string;
use crate::domain::errors::BootstrapError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BootstrapConfig
/// 4. Applies environment variable overrides (BOOTSTRAP_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use emr_bootstrap::config::loader::load_config;
///
/// let config = load_config("bootstrap.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BootstrapConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BootstrapError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BootstrapError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: BootstrapConfig = toml::from_str(&contents)
        .map_err(|e| BootstrapError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BootstrapError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Values are escaped for a TOML basic string, so placeholders belong inside
/// double quotes (`password = "${DB_PASSWORD}"`).
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| BootstrapError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comment lines keep their placeholders
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line =
                        processed_line.replace(&placeholder, &escape_basic_string(&value));
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BootstrapError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Escapes a value for the body of a TOML basic string
fn escape_basic_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Applies environment variable overrides using BOOTSTRAP_* prefix
///
/// Environment variables follow the pattern: BOOTSTRAP_<SECTION>_<KEY>
/// For example: BOOTSTRAP_REMOTE_BASE_URL, BOOTSTRAP_DATABASE_HOST
fn apply_env_overrides(config: &mut BootstrapConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("BOOTSTRAP_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Remote overrides
    if let Ok(val) = std::env::var("BOOTSTRAP_REMOTE_BASE_URL") {
        config.remote.base_url = val;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_REMOTE_USERNAME") {
        config.remote.username = val;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_REMOTE_PASSWORD") {
        config.remote.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_REMOTE_DATABASE_PATH") {
        config.remote.database_path = val;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_REMOTE_MODULES_PATH") {
        config.remote.modules_path = val;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_REMOTE_CONNECT_TIMEOUT_SECONDS") {
        config.remote.connect_timeout_seconds = parse_override(
            "BOOTSTRAP_REMOTE_CONNECT_TIMEOUT_SECONDS",
            &val,
        )?;
    }

    // Database overrides
    if let Ok(val) = std::env::var("BOOTSTRAP_DATABASE_HOST") {
        config.database.host = val;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_DATABASE_PORT") {
        config.database.port = parse_override("BOOTSTRAP_DATABASE_PORT", &val)?;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_DATABASE_NAME") {
        config.database.name = val;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_DATABASE_USER") {
        config.database.user = val;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_DATABASE_PASSWORD") {
        config.database.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_DATABASE_CLIENT_BINARY") {
        config.database.client_binary = val;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_DATABASE_DUMP_FILE") {
        config.database.dump_file = Some(PathBuf::from(val));
    }

    // Modules overrides
    if let Ok(val) = std::env::var("BOOTSTRAP_MODULES_REPOSITORY_PATH") {
        config.modules.repository_path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_MODULES_ENABLED") {
        config.modules.enabled = parse_override("BOOTSTRAP_MODULES_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_MODULES_CASE_INSENSITIVE_SUFFIX") {
        config.modules.case_insensitive_suffix =
            parse_override("BOOTSTRAP_MODULES_CASE_INSENSITIVE_SUFFIX", &val)?;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_MODULES_TEMP_DIR") {
        config.modules.temp_dir = Some(PathBuf::from(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("BOOTSTRAP_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled =
            parse_override("BOOTSTRAP_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("BOOTSTRAP_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        BootstrapError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}
