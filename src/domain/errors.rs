//! Domain error types
//!
//! This module defines the error hierarchy for the bootstrap subsystem.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main bootstrap error type
///
/// This is the primary error type used throughout the application.
/// It wraps the remote and seeding taxonomies and carries context for the rest.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote resource acquisition errors
    #[error("Remote resource error: {0}")]
    Remote(#[from] RemoteResourceError),

    /// Module archive expansion errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// Database seeding errors
    #[error("Seeding error: {0}")]
    Seeding(#[from] SeedingError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Failures while talking to the remote seed provider
///
/// The three kinds lead to different recovery paths: re-enter credentials,
/// wait for the operator, or fix local networking.
#[derive(Debug, Error)]
pub enum RemoteResourceError {
    /// The remote rejected the supplied credentials (HTTP 401)
    #[error("{0}")]
    AuthFailure(String),

    /// The remote failed on its side (HTTP 500)
    #[error("{0}")]
    RemoteError(String),

    /// Network unreachable, DNS failure, timeout, malformed URL
    #[error("Transport failure: {0}")]
    TransportFailure(String),
}

impl RemoteResourceError {
    /// Returns true if the user can recover by supplying other credentials
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, RemoteResourceError::AuthFailure(_))
    }
}

/// Failures while running the external database client
#[derive(Debug, Error)]
pub enum SeedingError {
    /// The client binary could not be started
    #[error("Failed to start database client '{binary}': {message}")]
    SpawnFailed { binary: String, message: String },

    /// Waiting for the client to finish failed
    #[error("Interrupted while waiting for the database client: {0}")]
    WaitFailed(String),

    /// The client exited with a non-zero status or was killed by a signal
    #[error("The process terminated abnormally (exit code: {})", display_code(.code))]
    AbnormalExit { code: Option<i32> },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

// Conversion from std::io::Error
impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        BootstrapError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for BootstrapError {
    fn from(err: serde_json::Error) -> Self {
        BootstrapError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BootstrapError {
    fn from(err: toml::de::Error) -> Self {
        BootstrapError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from zip archive errors
impl From<zip::result::ZipError> for BootstrapError {
    fn from(err: zip::result::ZipError) -> Self {
        BootstrapError::Archive(err.to_string())
    }
}
