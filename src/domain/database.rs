//! Database seeding target
//!
//! A [`DatabaseTarget`] names the server, credentials and SQL dump used for one
//! seeding run. It is built per invocation and dropped when the run ends.

use crate::config::SecretString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Connection parameters and dump location for one seeding run
///
/// All fields are required. The password is held as a [`SecretString`] so it
/// never shows up in `Debug` output or logs.
///
/// # Examples
///
/// ```
/// use emr_bootstrap::config::secret_string;
/// use emr_bootstrap::domain::DatabaseTarget;
///
/// let target = DatabaseTarget::builder()
///     .host("localhost")
///     .port(3306)
///     .database_name("openmrs")
///     .user("openmrs")
///     .password(secret_string("secret".to_string()))
///     .dump_file_path("/tmp/seed.sql")
///     .build()
///     .unwrap();
///
/// assert_eq!(target.port(), 3306);
/// assert!(!format!("{target:?}").contains("secret"));
/// ```
#[derive(Clone)]
pub struct DatabaseTarget {
    host: String,
    port: u16,
    database_name: String,
    user: String,
    password: SecretString,
    dump_file_path: PathBuf,
}

impl DatabaseTarget {
    /// Creates a new builder for DatabaseTarget
    pub fn builder() -> DatabaseTargetBuilder {
        DatabaseTargetBuilder::new()
    }

    /// Database server host name
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Database server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Name of the database to seed
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Database user
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Database password
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Path of the SQL dump to apply
    pub fn dump_file_path(&self) -> &Path {
        &self.dump_file_path
    }
}

impl fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_name", &self.database_name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("dump_file_path", &self.dump_file_path)
            .finish()
    }
}

/// Builder for DatabaseTarget
#[derive(Default)]
pub struct DatabaseTargetBuilder {
    host: Option<String>,
    port: Option<u16>,
    database_name: Option<String>,
    user: Option<String>,
    password: Option<SecretString>,
    dump_file_path: Option<PathBuf>,
}

impl DatabaseTargetBuilder {
    /// Creates a new DatabaseTargetBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the database name
    pub fn database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = Some(name.into());
        self
    }

    /// Sets the user
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the password
    pub fn password(mut self, password: SecretString) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the SQL dump path
    pub fn dump_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dump_file_path = Some(path.into());
        self
    }

    /// Builds the DatabaseTarget
    ///
    /// # Errors
    ///
    /// Returns an error if any field is missing or a text field is blank
    pub fn build(self) -> Result<DatabaseTarget, String> {
        let host = required_text(self.host, "host")?;
        let database_name = required_text(self.database_name, "database_name")?;
        let user = required_text(self.user, "user")?;
        let dump_file_path = self.dump_file_path.ok_or("dump_file_path is required")?;
        if dump_file_path.as_os_str().is_empty() {
            return Err("dump_file_path cannot be empty".to_string());
        }

        Ok(DatabaseTarget {
            host,
            port: self.port.ok_or("port is required")?,
            database_name,
            user,
            password: self.password.ok_or("password is required")?,
            dump_file_path,
        })
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(format!("{field} cannot be empty")),
        None => Err(format!("{field} is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use secrecy::ExposeSecret;

    fn complete_builder() -> DatabaseTargetBuilder {
        DatabaseTarget::builder()
            .host("h")
            .port(3306)
            .database_name("d")
            .user("u")
            .password(secret_string("p".to_string()))
            .dump_file_path("/tmp/d.sql")
    }

    #[test]
    fn test_builder_complete() {
        let target = complete_builder().build().unwrap();
        assert_eq!(target.host(), "h");
        assert_eq!(target.port(), 3306);
        assert_eq!(target.database_name(), "d");
        assert_eq!(target.user(), "u");
        assert_eq!(target.password().expose_secret(), "p");
        assert_eq!(target.dump_file_path(), Path::new("/tmp/d.sql"));
    }

    #[test]
    fn test_builder_missing_port() {
        let result = DatabaseTarget::builder()
            .host("h")
            .database_name("d")
            .user("u")
            .password(secret_string("p".to_string()))
            .dump_file_path("/tmp/d.sql")
            .build();
        assert_eq!(result.unwrap_err(), "port is required");
    }

    #[test]
    fn test_builder_blank_host() {
        let result = complete_builder().host("  ").build();
        assert_eq!(result.unwrap_err(), "host cannot be empty");
    }

    #[test]
    fn test_builder_missing_password() {
        let result = DatabaseTarget::builder()
            .host("h")
            .port(3306)
            .database_name("d")
            .user("u")
            .dump_file_path("/tmp/d.sql")
            .build();
        assert_eq!(result.unwrap_err(), "password is required");
    }

    #[test]
    fn test_debug_redacts_password() {
        let target = complete_builder()
            .password(secret_string("hunter2".to_string()))
            .build()
            .unwrap();
        let debug = format!("{target:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("REDACTED"));
    }
}
