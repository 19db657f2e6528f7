//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use emr_bootstrap::config::load_config;
use secrecy::ExposeSecret;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("BOOTSTRAP_APPLICATION_LOG_LEVEL");
    std::env::remove_var("BOOTSTRAP_REMOTE_BASE_URL");
    std::env::remove_var("BOOTSTRAP_REMOTE_USERNAME");
    std::env::remove_var("BOOTSTRAP_REMOTE_PASSWORD");
    std::env::remove_var("BOOTSTRAP_DATABASE_PORT");
    std::env::remove_var("BOOTSTRAP_DATABASE_PASSWORD");
    std::env::remove_var("BOOTSTRAP_REMOTE_DATABASE_PATH");
    std::env::remove_var("BOOTSTRAP_REMOTE_MODULES_PATH");
    std::env::remove_var("BOOTSTRAP_DATABASE_DUMP_FILE");
    std::env::remove_var("BOOTSTRAP_MODULES_ENABLED");
    std::env::remove_var("BOOTSTRAP_MODULES_CASE_INSENSITIVE_SUFFIX");
    std::env::remove_var("BOOTSTRAP_MODULES_TEMP_DIR");
    std::env::remove_var("BOOTSTRAP_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("BOOTSTRAP_LOGGING_LOCAL_ROTATION");
    std::env::remove_var("TEST_REMOTE_PASSWORD");
    std::env::remove_var("TEST_DATABASE_PASSWORD");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

const MINIMAL_CONFIG: &str = r#"
[remote]
base_url = "https://seed.example.org/openmrs"
username = "admin"
password = "Admin123"

[database]
host = "localhost"
name = "openmrs"
user = "openmrs"
password = "dbpass"

[modules]
repository_path = "/tmp/emr-bootstrap-modules"
"#;

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"

[remote]
base_url = "https://seed.example.org/openmrs/"
username = "admin"
password = "Admin123"
database_path = "custom/dump.form"
modules_path = "custom/modules.htm"
connect_timeout_seconds = 30

[database]
host = "db.internal"
port = 3307
name = "clinic"
user = "clinic_user"
password = "dbpass"
client_binary = "/usr/local/mysql/bin/mysql"
dump_file = "/srv/seed/dump.sql"

[modules]
enabled = false
repository_path = "/var/lib/openmrs/modules"
case_insensitive_suffix = true
temp_dir = "/var/tmp"

[logging]
local_enabled = false
local_path = "/tmp/emr-bootstrap"
local_rotation = "hourly"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");

    assert_eq!(config.remote.base_url, "https://seed.example.org/openmrs/");
    assert_eq!(config.remote.username, "admin");
    assert_eq!(config.remote.password.expose_secret(), "Admin123");
    assert_eq!(config.remote.connect_timeout_seconds, 30);
    assert_eq!(
        config.remote.database_endpoint().unwrap().url(),
        "https://seed.example.org/openmrs/custom/dump.form"
    );
    assert_eq!(
        config.remote.modules_endpoint().unwrap().url(),
        "https://seed.example.org/openmrs/custom/modules.htm"
    );

    assert_eq!(config.database.host, "db.internal");
    assert_eq!(config.database.port, 3307);
    assert_eq!(config.database.client_binary, "/usr/local/mysql/bin/mysql");
    assert_eq!(
        config.database.dump_file,
        Some(PathBuf::from("/srv/seed/dump.sql"))
    );

    assert!(!config.modules.enabled);
    assert!(config.modules.case_insensitive_suffix);
    assert_eq!(config.modules.temp_dir, Some(PathBuf::from("/var/tmp")));

    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(MINIMAL_CONFIG);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.remote.connect_timeout_seconds, 15);
    assert_eq!(
        config.remote.database_endpoint().unwrap().url(),
        "https://seed.example.org/openmrs/module/testing/generateTestDatabase.form"
    );
    assert_eq!(
        config.remote.modules_endpoint().unwrap().url(),
        "https://seed.example.org/openmrs/module/testing/getModules.htm"
    );
    assert_eq!(config.database.port, 3306);
    assert_eq!(config.database.client_binary, "mysql");
    assert!(config.database.dump_file.is_none());
    assert!(config.modules.enabled);
    assert!(!config.modules.case_insensitive_suffix);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_REMOTE_PASSWORD", "remote_secret");
    std::env::set_var("TEST_DATABASE_PASSWORD", "db_secret");

    let toml_content = r#"
[remote]
base_url = "https://seed.example.org/openmrs"
username = "admin"
password = "${TEST_REMOTE_PASSWORD}"

[database]
host = "localhost"
name = "openmrs"
user = "openmrs"
password = "${TEST_DATABASE_PASSWORD}"

[modules]
repository_path = "/tmp/emr-bootstrap-modules"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.remote.password.expose_secret(), "remote_secret");
    assert_eq!(config.database.password.expose_secret(), "db_secret");

    cleanup_env_vars();
}

#[test]
fn test_env_var_substitution_escapes_toml_characters() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_REMOTE_PASSWORD", r#"p\d"x"#);
    std::env::set_var("TEST_DATABASE_PASSWORD", "tab\there\\n");

    let toml_content = MINIMAL_CONFIG
        .replace("\"Admin123\"", "\"${TEST_REMOTE_PASSWORD}\"")
        .replace("\"dbpass\"", "\"${TEST_DATABASE_PASSWORD}\"");
    let temp_file = write_config(&toml_content);
    let result = load_config(temp_file.path());

    cleanup_env_vars();
    let config = result.expect("Failed to load config");
    assert_eq!(config.remote.password.expose_secret(), r#"p\d"x"#);
    assert_eq!(config.database.password.expose_secret(), "tab\there\\n");
}

#[test]
fn test_missing_substitution_variable_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = MINIMAL_CONFIG.replace("\"dbpass\"", "\"${TEST_DATABASE_PASSWORD}\"");
    let temp_file = write_config(&toml_content);

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_DATABASE_PASSWORD"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("BOOTSTRAP_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("BOOTSTRAP_REMOTE_BASE_URL", "http://localhost:8080/openmrs");
    std::env::set_var("BOOTSTRAP_DATABASE_PORT", "3310");
    std::env::set_var("BOOTSTRAP_MODULES_ENABLED", "false");

    let temp_file = write_config(MINIMAL_CONFIG);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.remote.base_url, "http://localhost:8080/openmrs");
    assert_eq!(config.database.port, 3310);
    assert!(!config.modules.enabled);

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("BOOTSTRAP_DATABASE_PORT", "not-a-port");

    let temp_file = write_config(MINIMAL_CONFIG);
    let result = load_config(temp_file.path());

    cleanup_env_vars();
    assert!(result.is_err());
}

#[test]
fn test_all_keys_have_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("BOOTSTRAP_REMOTE_DATABASE_PATH", "alt/dump.form");
    std::env::set_var("BOOTSTRAP_REMOTE_MODULES_PATH", "alt/modules.htm");
    std::env::set_var("BOOTSTRAP_DATABASE_DUMP_FILE", "/srv/seed/override.sql");
    std::env::set_var("BOOTSTRAP_MODULES_CASE_INSENSITIVE_SUFFIX", "true");
    std::env::set_var("BOOTSTRAP_MODULES_TEMP_DIR", "/var/tmp/bootstrap");
    std::env::set_var("BOOTSTRAP_LOGGING_LOCAL_ENABLED", "true");
    std::env::set_var("BOOTSTRAP_LOGGING_LOCAL_ROTATION", "hourly");

    let temp_file = write_config(MINIMAL_CONFIG);
    let result = load_config(temp_file.path());

    cleanup_env_vars();
    let config = result.expect("Failed to load config");
    assert_eq!(
        config.remote.database_endpoint().unwrap().url(),
        "https://seed.example.org/openmrs/alt/dump.form"
    );
    assert_eq!(
        config.remote.modules_endpoint().unwrap().url(),
        "https://seed.example.org/openmrs/alt/modules.htm"
    );
    assert_eq!(
        config.database.dump_file,
        Some(PathBuf::from("/srv/seed/override.sql"))
    );
    assert!(config.modules.case_insensitive_suffix);
    assert_eq!(
        config.modules.temp_dir,
        Some(PathBuf::from("/var/tmp/bootstrap"))
    );
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_invalid_boolean_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();

    for name in [
        "BOOTSTRAP_MODULES_ENABLED",
        "BOOTSTRAP_MODULES_CASE_INSENSITIVE_SUFFIX",
        "BOOTSTRAP_LOGGING_LOCAL_ENABLED",
    ] {
        cleanup_env_vars();
        std::env::set_var(name, "no");

        let temp_file = write_config(MINIMAL_CONFIG);
        let result = load_config(temp_file.path());

        cleanup_env_vars();
        let err = result.expect_err(name);
        assert!(err.to_string().contains(name), "{err}");
    }
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = format!("[application]\nlog_level = \"invalid_level\"\n{MINIMAL_CONFIG}");
    let temp_file = write_config(&toml_content);

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_invalid_base_url_scheme() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = MINIMAL_CONFIG.replace("https://seed.example.org/openmrs", "ftp://seed.example.org");
    let temp_file = write_config(&toml_content);

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("base_url"));
}

#[test]
fn test_config_debug_hides_passwords() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(MINIMAL_CONFIG);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    let debug = format!("{config:?}");
    assert!(!debug.contains("Admin123"));
    assert!(!debug.contains("dbpass"));
}
