//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output filtered by level or `RUST_LOG`
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use emr_bootstrap::logging::init_logging;
//! use emr_bootstrap::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Bootstrap started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an install step
///
/// # Example
///
/// ```no_run
/// use emr_bootstrap::log_step_start;
///
/// log_step_start!("probe", "https://seed.example.org/");
/// ```
#[macro_export]
macro_rules! log_step_start {
    ($step:expr, $detail:expr) => {
        tracing::info!(step = $step, detail = %$detail, "Starting install step");
    };
}

/// Log the completion of an install step
///
/// # Example
///
/// ```no_run
/// use emr_bootstrap::log_step_complete;
/// use std::time::Instant;
///
/// let started = Instant::now();
/// log_step_complete!("probe", started.elapsed());
/// ```
#[macro_export]
macro_rules! log_step_complete {
    ($step:expr, $duration:expr) => {
        tracing::info!(
            step = $step,
            duration_ms = $duration.as_millis() as u64,
            "Install step completed"
        );
    };
}
