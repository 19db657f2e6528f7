//! Domain models and types for the bootstrap subsystem.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Value types** ([`DatabaseTarget`], [`RemoteEndpoint`]) created per operation
//! - **Error types** ([`BootstrapError`], [`RemoteResourceError`], [`SeedingError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, BootstrapError>`]:
//!
//! ```rust
//! use emr_bootstrap::domain::{BootstrapError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = emr_bootstrap::config::load_config("bootstrap.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! The remote fetcher surfaces [`RemoteResourceError`] so callers can tell a
//! credential rejection from a server failure or a local network problem:
//!
//! ```rust
//! use emr_bootstrap::domain::RemoteResourceError;
//!
//! fn describe(err: &RemoteResourceError) -> &'static str {
//!     match err {
//!         RemoteResourceError::AuthFailure(_) => "re-enter credentials",
//!         RemoteResourceError::RemoteError(_) => "retry later",
//!         RemoteResourceError::TransportFailure(_) => "check the network",
//!     }
//! }
//! ```

pub mod database;
pub mod endpoint;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use database::{DatabaseTarget, DatabaseTargetBuilder};
pub use endpoint::RemoteEndpoint;
pub use errors::{BootstrapError, RemoteResourceError, SeedingError};
pub use result::Result;
