//! SQL dump seeding through the external `mysql` client
//!
//! The client is started with its stderr piped. The pipe is drained while
//! the process runs, so a chatty client cannot block on a full pipe before
//! it exits.

use crate::domain::{DatabaseTarget, SeedingError};
use secrecy::ExposeSecret;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Client executable used when none is configured
pub const DEFAULT_CLIENT_BINARY: &str = "mysql";

/// Line terminator appended to each captured diagnostic line
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Line terminator appended to each captured diagnostic line
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

const REDACTED_PASSWORD: &str = "--password=******";

/// Outcome of a successful seeding run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Everything the client wrote to stderr, one terminated line per line
    pub transcript: String,

    /// Exit code of the client
    pub exit_code: Option<i32>,
}

/// Applies SQL dumps by running the database client
#[derive(Debug, Clone)]
pub struct DatabaseSeeder {
    client_binary: String,
}

impl Default for DatabaseSeeder {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_BINARY)
    }
}

impl DatabaseSeeder {
    /// Create a seeder that runs `client_binary`
    ///
    /// A bare name is resolved through `PATH`.
    pub fn new(client_binary: impl Into<String>) -> Self {
        Self {
            client_binary: client_binary.into(),
        }
    }

    /// The client executable this seeder runs
    pub fn client_binary(&self) -> &str {
        &self.client_binary
    }

    /// Full argument vector, program name first
    ///
    /// The password appears in cleartext; never log the result directly.
    pub fn command_line(&self, target: &DatabaseTarget) -> Vec<String> {
        let mut argv = Vec::with_capacity(8);
        argv.push(self.client_binary.clone());
        argv.extend(client_arguments(target));
        argv
    }

    /// Command line with the password masked, suitable for logs
    pub fn redacted_command_line(&self, target: &DatabaseTarget) -> String {
        self.command_line(target)
            .into_iter()
            .map(|arg| {
                if arg.starts_with("--password=") {
                    REDACTED_PASSWORD.to_string()
                } else {
                    arg
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Load the target's SQL dump, reporting success as a boolean
    ///
    /// Every failure is logged; the caller only learns whether the database was
    /// seeded.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use emr_bootstrap::adapters::mysql::DatabaseSeeder;
    /// use emr_bootstrap::config::secret_string;
    /// use emr_bootstrap::domain::DatabaseTarget;
    ///
    /// # async fn example() {
    /// let target = DatabaseTarget::builder()
    ///     .host("localhost")
    ///     .port(3306)
    ///     .database_name("openmrs")
    ///     .user("openmrs")
    ///     .password(secret_string("pw".to_string()))
    ///     .dump_file_path("/tmp/seed.sql")
    ///     .build()
    ///     .unwrap();
    ///
    /// let seeded = DatabaseSeeder::default().apply_sql_dump(&target).await;
    /// # }
    /// ```
    pub async fn apply_sql_dump(&self, target: &DatabaseTarget) -> bool {
        match self.seed(target).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    database = %target.database_name(),
                    error = %e,
                    "Failed to add test data"
                );
                false
            }
        }
    }

    /// Run the client against the target and wait for it to exit
    ///
    /// A non-blank stderr transcript is logged at error level whatever the
    /// exit status.
    ///
    /// # Errors
    ///
    /// - [`SeedingError::SpawnFailed`] if the client cannot be started
    /// - [`SeedingError::WaitFailed`] if waiting for the client fails
    /// - [`SeedingError::AbnormalExit`] if the client exits with a non-zero status
    pub async fn seed(&self, target: &DatabaseTarget) -> Result<SeedReport, SeedingError> {
        tracing::info!(
            command = %self.redacted_command_line(target),
            dump = %target.dump_file_path().display(),
            "Adding test data from SQL dump"
        );

        let mut child = Command::new(&self.client_binary)
            .args(client_arguments(target))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SeedingError::SpawnFailed {
                binary: self.client_binary.clone(),
                message: e.to_string(),
            })?;

        let stderr = child.stderr.take();
        let (transcript, status) = tokio::join!(
            async {
                match stderr {
                    Some(stderr) => read_transcript(stderr).await,
                    None => String::new(),
                }
            },
            child.wait()
        );

        let diagnostics = transcript.trim();
        if !diagnostics.is_empty() {
            tracing::error!(client = %self.client_binary, "{diagnostics}");
        }

        let status = status.map_err(|e| SeedingError::WaitFailed(e.to_string()))?;
        check_status(status)?;

        tracing::debug!(database = %target.database_name(), "Added test data successfully");

        Ok(SeedReport {
            transcript,
            exit_code: status.code(),
        })
    }
}

/// Client arguments for a target, in the order the client expects them
fn client_arguments(target: &DatabaseTarget) -> Vec<String> {
    vec![
        format!("--host={}", target.host()),
        format!("--port={}", target.port()),
        format!("--user={}", target.user()),
        format!("--password={}", target.password().expose_secret().as_str()),
        format!("--database={}", target.database_name()),
        "-e".to_string(),
        format!("source {}", target.dump_file_path().display()),
    ]
}

fn check_status(status: ExitStatus) -> Result<(), SeedingError> {
    if status.success() {
        Ok(())
    } else {
        Err(SeedingError::AbnormalExit {
            code: status.code(),
        })
    }
}

/// Reads `reader` to the end, one line at a time
///
/// Invalid UTF-8 is replaced rather than aborting the read. A read error
/// ends the transcript early and is logged.
async fn read_transcript<R: AsyncRead + Unpin>(reader: R) -> String {
    let mut reader = BufReader::new(reader);
    let mut transcript = String::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                transcript.push_str(text.trim_end_matches(&['\r', '\n'][..]));
                transcript.push_str(LINE_SEPARATOR);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read database client diagnostics");
                break;
            }
        }
    }

    transcript
}
