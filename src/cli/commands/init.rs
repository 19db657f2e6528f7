//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIGURATION, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "bootstrap.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing bootstrap configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIGURATION);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - BOOTSTRAP_REMOTE_USERNAME and BOOTSTRAP_REMOTE_PASSWORD");
                println!("     - BOOTSTRAP_DATABASE_PASSWORD");
                println!("  3. Validate configuration: emr-bootstrap validate-config");
                println!("  4. Check the seed server: emr-bootstrap probe");
                println!("  5. Run the bootstrap: emr-bootstrap install");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# EMR Bootstrap Configuration File
# Seeds a fresh installation with test data and modules

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[remote]
# Server providing the seed data
base_url = "https://seed.example.org/openmrs/"
username = "${BOOTSTRAP_REMOTE_USERNAME}"
password = "${BOOTSTRAP_REMOTE_PASSWORD}"
# Paths relative to base_url
database_path = "module/testing/generateTestDatabase.form"
modules_path = "module/testing/getModules.htm"
connect_timeout_seconds = 15

[database]
host = "localhost"
port = 3306
name = "openmrs"
user = "openmrs"
password = "${BOOTSTRAP_DATABASE_PASSWORD}"
# Client executable, searched on PATH unless absolute
client_binary = "mysql"
# Apply this local dump instead of downloading one
# dump_file = "/path/to/local/dump.sql"

[modules]
enabled = true
repository_path = "/var/lib/openmrs/modules"
# Accept .OMOD and other casings of the suffix
case_insensitive_suffix = false
# Directory for the temporary archive copy
# temp_dir = "/var/tmp"

[logging]
local_enabled = false
local_path = "/var/log/emr-bootstrap"
# Rotation: daily, hourly
local_rotation = "daily"
"#
        .to_string()
    }
}
