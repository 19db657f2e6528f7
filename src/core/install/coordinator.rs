//! Install coordinator - runs one bootstrap from probe to seeded database
//!
//! The coordinator wires the prober, fetcher, module provisioner and
//! database seeder together from a loaded configuration.

use crate::adapters::mysql::DatabaseSeeder;
use crate::adapters::remote::{ReachabilityProber, RemoteFetcher};
use crate::config::BootstrapConfig;
use crate::core::install::summary::InstallSummary;
use crate::core::modules::ModuleProvisioner;
use crate::domain::{BootstrapError, RemoteResourceError, Result};
use crate::{log_step_complete, log_step_start};
use chrono::Utc;
use std::path::PathBuf;
use std::time::Instant;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

const DUMP_FILE_PREFIX: &str = "dump";
const DUMP_FILE_SUFFIX: &str = ".sql";

/// Install coordinator
pub struct Installer {
    config: BootstrapConfig,
    prober: ReachabilityProber,
    fetcher: RemoteFetcher,
    provisioner: ModuleProvisioner,
    seeder: DatabaseSeeder,
}

/// Where the SQL dump for this run lives
///
/// A downloaded dump owns its temp path, which deletes the file on drop.
struct DumpFile {
    path: PathBuf,
    temp: Option<TempPath>,
}

impl DumpFile {
    fn release(self) {
        if let Some(temp) = self.temp {
            if let Err(e) = temp.close() {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to delete downloaded SQL dump"
                );
            }
        }
    }
}

impl Installer {
    /// Create a new installer
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be constructed
    pub fn new(config: BootstrapConfig) -> Result<Self> {
        let timeout = config.remote.connect_timeout();
        let prober = ReachabilityProber::new(timeout)?;
        let fetcher = RemoteFetcher::new(timeout)?;
        let provisioner = ModuleProvisioner::from_config(&config.modules);
        let seeder = DatabaseSeeder::new(config.database.client_binary.clone());

        Ok(Self {
            config,
            prober,
            fetcher,
            provisioner,
            seeder,
        })
    }

    /// Execute the bootstrap
    ///
    /// Steps, in order:
    /// 1. Probe the remote base URL
    /// 2. Obtain the SQL dump (configured local file or remote download)
    /// 3. Fetch and expand the module archive, unless skipped or disabled
    /// 4. Apply the SQL dump with the database client
    ///
    /// A downloaded dump is deleted before this returns, on every path.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error
    pub async fn execute(&self, skip_modules: bool) -> Result<InstallSummary> {
        let start_time = Instant::now();
        let mut summary = InstallSummary::new(Utc::now());

        tracing::info!(
            base_url = %self.config.remote.base_url,
            skip_modules,
            "Starting bootstrap install"
        );

        self.probe_remote(&mut summary).await?;

        let dump = self.obtain_dump().await?;
        let outcome = self.provision_and_seed(&dump, skip_modules, &mut summary).await;
        dump.release();
        outcome?;

        summary.complete(Utc::now());
        summary.log_summary();
        tracing::debug!(elapsed_ms = start_time.elapsed().as_millis() as u64, "Install finished");

        Ok(summary)
    }

    async fn probe_remote(&self, summary: &mut InstallSummary) -> Result<()> {
        let step_start = Instant::now();
        let base_url = &self.config.remote.base_url;
        log_step_start!("probe", base_url);

        summary.remote_reachable = self.prober.probe(base_url).await;
        if !summary.remote_reachable {
            return Err(RemoteResourceError::TransportFailure(format!(
                "Remote server {base_url} is not reachable"
            ))
            .into());
        }

        log_step_complete!("probe", step_start.elapsed());
        Ok(())
    }

    async fn provision_and_seed(
        &self,
        dump: &DumpFile,
        skip_modules: bool,
        summary: &mut InstallSummary,
    ) -> Result<()> {
        if skip_modules || !self.config.modules.enabled {
            tracing::info!("Skipping module provisioning");
        } else {
            summary.modules_provisioned = self.provision_modules().await?;
        }

        let step_start = Instant::now();
        log_step_start!("seed", dump.path.display());

        let target = self
            .config
            .database
            .target(&dump.path)
            .map_err(BootstrapError::Configuration)?;
        self.seeder.seed(&target).await?;
        summary.database_seeded = true;

        log_step_complete!("seed", step_start.elapsed());
        Ok(())
    }

    async fn provision_modules(&self) -> Result<Vec<String>> {
        let step_start = Instant::now();
        let endpoint = self
            .config
            .remote
            .modules_endpoint()
            .map_err(BootstrapError::Configuration)?;
        log_step_start!("modules", endpoint.url());

        let stream = self.fetcher.fetch_endpoint(&endpoint).await?;
        let report = self.provisioner.provision(stream).await?;

        tracing::info!(
            repository = %self.provisioner.repository().display(),
            modules = report.modules.len(),
            skipped = report.skipped,
            "Modules provisioned"
        );
        log_step_complete!("modules", step_start.elapsed());
        Ok(report.module_names())
    }

    async fn obtain_dump(&self) -> Result<DumpFile> {
        if let Some(path) = &self.config.database.dump_file {
            tracing::info!(path = %path.display(), "Using configured SQL dump");
            return Ok(DumpFile {
                path: path.clone(),
                temp: None,
            });
        }

        let step_start = Instant::now();
        let endpoint = self
            .config
            .remote
            .database_endpoint()
            .map_err(BootstrapError::Configuration)?;
        log_step_start!("dump", endpoint.url());

        let mut stream = self.fetcher.fetch_endpoint(&endpoint).await?;

        let temp = tempfile::Builder::new()
            .prefix(DUMP_FILE_PREFIX)
            .suffix(DUMP_FILE_SUFFIX)
            .tempfile()
            .map_err(|e| BootstrapError::Io(format!("Failed to create temporary file: {e}")))?;

        let mut file = tokio::fs::File::from_std(temp.as_file().try_clone()?);
        let bytes = tokio::io::copy(&mut stream, &mut file).await?;
        file.flush().await?;
        drop(file);
        drop(stream);

        let temp = temp.into_temp_path();
        let path = temp.to_path_buf();
        tracing::info!(path = %path.display(), bytes, "Downloaded SQL dump");
        log_step_complete!("dump", step_start.elapsed());

        Ok(DumpFile {
            path,
            temp: Some(temp),
        })
    }
}
