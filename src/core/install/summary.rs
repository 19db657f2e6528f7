//! Install summary and reporting

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of one bootstrap run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub completed_at: DateTime<Utc>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,

    /// Whether the remote seed provider answered the probe
    pub remote_reachable: bool,

    /// Modules written to the repository, in archive order
    pub modules_provisioned: Vec<String>,

    /// Whether the SQL dump was applied
    pub database_seeded: bool,
}

impl InstallSummary {
    /// Create an empty summary for a run starting at `started_at`
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            completed_at: started_at,
            duration_ms: 0,
            remote_reachable: false,
            modules_provisioned: Vec::new(),
            database_seeded: false,
        }
    }

    /// Stamp the completion time and derive the duration from it
    pub fn complete(&mut self, completed_at: DateTime<Utc>) {
        self.completed_at = completed_at;
        self.duration_ms = (completed_at - self.started_at)
            .num_milliseconds()
            .max(0) as u64;
    }

    /// Check whether the bootstrap finished with a seeded database
    pub fn is_successful(&self) -> bool {
        self.remote_reachable && self.database_seeded
    }

    /// Render the summary as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> crate::domain::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            remote_reachable = self.remote_reachable,
            modules = self.modules_provisioned.len(),
            database_seeded = self.database_seeded,
            duration_ms = self.duration_ms,
            "Bootstrap completed"
        );

        for module in &self.modules_provisioned {
            tracing::debug!(module = %module, "Provisioned module");
        }
    }
}
