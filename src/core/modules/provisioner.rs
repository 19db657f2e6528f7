//! Module archive expansion
//!
//! An incoming archive is buffered to a temporary file, then read as a zip
//! on a blocking worker. Module entries are flattened into the repository;
//! everything else is skipped.

use super::naming::{is_contained_file_name, stored_module_name};
use crate::config::ModulesConfig;
use crate::domain::{BootstrapError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::{AsyncRead, AsyncWriteExt};
use zip::ZipArchive;

const TEMP_FILE_PREFIX: &str = "modules";

/// Options controlling how an archive is expanded
#[derive(Debug, Clone, Default)]
pub struct ProvisionOptions {
    /// Accept `.OMOD` and other case variants of the suffix
    pub case_insensitive_suffix: bool,

    /// Directory for the temporary archive copy (system default if unset)
    pub temp_dir: Option<PathBuf>,
}

impl From<&ModulesConfig> for ProvisionOptions {
    fn from(config: &ModulesConfig) -> Self {
        Self {
            case_insensitive_suffix: config.case_insensitive_suffix,
            temp_dir: config.temp_dir.clone(),
        }
    }
}

/// A module written to the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionedModule {
    /// File name inside the repository
    pub file_name: String,

    /// Bytes written
    pub bytes: u64,
}

/// Result of expanding one archive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpansionReport {
    /// Modules written, in archive order
    pub modules: Vec<ProvisionedModule>,

    /// Entries skipped (directories and non-module files)
    pub skipped: usize,
}

impl ExpansionReport {
    /// File names of the provisioned modules
    pub fn module_names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.file_name.clone()).collect()
    }
}

/// Expands module archives into a module repository
#[derive(Debug, Clone)]
pub struct ModuleProvisioner {
    repository: PathBuf,
    options: ProvisionOptions,
}

impl ModuleProvisioner {
    /// Create a provisioner writing into `repository`
    pub fn new(repository: impl Into<PathBuf>, options: ProvisionOptions) -> Self {
        Self {
            repository: repository.into(),
            options,
        }
    }

    /// Create a provisioner from the `[modules]` configuration section
    pub fn from_config(config: &ModulesConfig) -> Self {
        Self::new(config.repository_path.clone(), ProvisionOptions::from(config))
    }

    /// The module repository directory
    pub fn repository(&self) -> &Path {
        &self.repository
    }

    /// Expand an archive, reporting success as a boolean
    ///
    /// The stream is consumed and closed whatever the outcome. Failures are
    /// logged once at error level. Modules already written before a failure
    /// stay in the repository.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use emr_bootstrap::core::modules::{ModuleProvisioner, ProvisionOptions};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let provisioner = ModuleProvisioner::new("/var/lib/openmrs/modules", ProvisionOptions::default());
    /// let archive = tokio::fs::File::open("modules.zip").await?;
    /// if !provisioner.expand_modules(archive).await {
    ///     eprintln!("Module expansion failed");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn expand_modules<R>(&self, stream: R) -> bool
    where
        R: AsyncRead + Unpin,
    {
        match self.provision(stream).await {
            Ok(report) => {
                tracing::info!(
                    repository = %self.repository.display(),
                    modules = report.modules.len(),
                    skipped = report.skipped,
                    "Module archive expanded"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    repository = %self.repository.display(),
                    error = %e,
                    "Failed to expand module archive"
                );
                false
            }
        }
    }

    /// Expand an archive into the repository
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or temp file cannot be created, the
    /// stream fails mid-read, the data is not a readable zip archive, or a
    /// module cannot be written.
    pub async fn provision<R>(&self, stream: R) -> Result<ExpansionReport>
    where
        R: AsyncRead + Unpin,
    {
        tokio::fs::create_dir_all(&self.repository)
            .await
            .map_err(|e| {
                BootstrapError::Io(format!(
                    "Failed to create module repository {}: {e}",
                    self.repository.display()
                ))
            })?;

        let temp = self.create_temp_file()?;

        match buffer_stream(stream, &temp).await {
            Ok(bytes) => {
                tracing::debug!(
                    path = %temp.path().display(),
                    bytes,
                    "Buffered module archive"
                );
            }
            Err(e) => {
                discard_temp_file(temp);
                return Err(e);
            }
        }

        let repository = self.repository.clone();
        let case_insensitive = self.options.case_insensitive_suffix;

        tokio::task::spawn_blocking(move || {
            let result = File::open(temp.path())
                .map_err(BootstrapError::from)
                .and_then(|file| extract_modules(file, &repository, case_insensitive));
            discard_temp_file(temp);
            result
        })
        .await
        .map_err(|e| BootstrapError::Archive(format!("Extraction worker failed: {e}")))?
    }

    fn create_temp_file(&self) -> Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_FILE_PREFIX);

        let temp = match &self.options.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };

        temp.map_err(|e| BootstrapError::Io(format!("Failed to create temporary file: {e}")))
    }
}

/// Copies the whole stream into the temp file, then drops the stream
async fn buffer_stream<R>(mut stream: R, temp: &NamedTempFile) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut file = tokio::fs::File::from_std(temp.as_file().try_clone()?);
    let bytes = tokio::io::copy(&mut stream, &mut file).await?;
    file.flush().await?;
    Ok(bytes)
}

fn discard_temp_file(temp: NamedTempFile) {
    let path = temp.path().to_path_buf();
    if let Err(e) = temp.close() {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to delete temporary archive file"
        );
    }
}

/// Walks every entry of the archive, writing modules into `repository`
fn extract_modules<A>(
    archive: A,
    repository: &Path,
    case_insensitive: bool,
) -> Result<ExpansionReport>
where
    A: Read + Seek,
{
    let mut archive = ZipArchive::new(archive)?;
    let mut report = ExpansionReport::default();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();

        if entry.is_dir() {
            tracing::debug!(entry = %name, "Skipping directory entry");
            report.skipped += 1;
            continue;
        }

        let Some(file_name) = stored_module_name(&name, case_insensitive) else {
            tracing::debug!(entry = %name, "Ignoring non-module entry");
            report.skipped += 1;
            continue;
        };

        if !is_contained_file_name(&file_name) {
            tracing::warn!(
                entry = %name,
                module = %file_name,
                "Ignoring module entry that would escape the repository"
            );
            report.skipped += 1;
            continue;
        }

        let destination = repository.join(&file_name);
        let bytes = write_entry(&mut entry, &destination).map_err(|e| {
            BootstrapError::Io(format!(
                "Failed to write module {}: {e}",
                destination.display()
            ))
        })?;

        tracing::debug!(entry = %name, module = %file_name, bytes, "Provisioned module");
        report.modules.push(ProvisionedModule { file_name, bytes });
    }

    Ok(report)
}

fn write_entry(entry: &mut impl Read, destination: &Path) -> std::io::Result<u64> {
    let mut writer = BufWriter::new(File::create(destination)?);
    let bytes = std::io::copy(entry, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}
