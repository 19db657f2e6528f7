//! Bootstrap orchestration
//!
//! This module runs a complete bootstrap, including:
//! - Reachability check of the remote seed provider
//! - SQL dump download and module provisioning
//! - Database seeding and summary reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::Installer;
pub use summary::InstallSummary;
