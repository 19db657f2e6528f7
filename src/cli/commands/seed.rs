//! Seed-database command implementation
//!
//! This module implements the `seed-database` command, which applies a
//! local SQL dump with the configured database client.

use super::{EXIT_CONFIGURATION, EXIT_OPERATION_FAILED};
use crate::adapters::mysql::DatabaseSeeder;
use crate::config::load_config;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the seed-database command
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// SQL dump to apply (defaults to database.dump_file)
    #[arg(short, long)]
    pub dump: Option<PathBuf>,
}

impl SeedArgs {
    /// Execute the seed-database command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIGURATION);
            }
        };

        let Some(dump) = self.dump.clone().or_else(|| config.database.dump_file.clone()) else {
            eprintln!("No SQL dump given. Use --dump or set database.dump_file");
            return Ok(EXIT_CONFIGURATION);
        };

        if !dump.is_file() {
            eprintln!("❌ SQL dump not found: {}", dump.display());
            return Ok(EXIT_OPERATION_FAILED);
        }

        let target = match config.database.target(&dump) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Invalid database configuration: {e}");
                return Ok(EXIT_CONFIGURATION);
            }
        };

        println!(
            "🗄️  Seeding {} on {}:{} from {}",
            target.database_name(),
            target.host(),
            target.port(),
            dump.display()
        );

        let seeder = DatabaseSeeder::new(config.database.client_binary.clone());
        if seeder.apply_sql_dump(&target).await {
            println!("✅ Test data added");
            Ok(0)
        } else {
            println!("❌ Seeding failed, see log for the client's diagnostics");
            Ok(EXIT_OPERATION_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_missing_config() {
        let args = SeedArgs { dump: None };
        let code = args
            .execute("/nonexistent/emr-bootstrap/bootstrap.toml")
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIGURATION);
    }
}
