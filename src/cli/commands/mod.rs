//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod init;
pub mod install;
pub mod probe;
pub mod provision;
pub mod seed;
pub mod validate;

use crate::domain::{BootstrapError, RemoteResourceError};

/// Process exit code for a failed operation
pub const EXIT_OPERATION_FAILED: i32 = 1;
/// Process exit code for an unreadable or invalid configuration
pub const EXIT_CONFIGURATION: i32 = 2;
/// Process exit code for credentials rejected by the remote
pub const EXIT_AUTH_FAILURE: i32 = 3;
/// Process exit code for anything unexpected
pub const EXIT_FATAL: i32 = 5;

/// Maps an error to the process exit code reported for it
pub fn exit_code_for(error: &BootstrapError) -> i32 {
    match error {
        BootstrapError::Configuration(_) | BootstrapError::Validation(_) => EXIT_CONFIGURATION,
        BootstrapError::Remote(RemoteResourceError::AuthFailure(_)) => EXIT_AUTH_FAILURE,
        BootstrapError::Remote(_)
        | BootstrapError::Archive(_)
        | BootstrapError::Seeding(_)
        | BootstrapError::Io(_) => EXIT_OPERATION_FAILED,
        BootstrapError::Serialization(_) => EXIT_FATAL,
    }
}
