//! External system integrations for the bootstrap.
//!
//! - [`remote`] - Remote seed provider (reachability probe, authenticated fetch)
//! - [`mysql`] - External database client used to apply SQL dumps
//!
//! # Remote Adapter
//!
//! ```rust,no_run
//! use emr_bootstrap::adapters::remote::{ReachabilityProber, RemoteFetcher};
//! use emr_bootstrap::config::secret_string;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let prober = ReachabilityProber::with_default_timeout()?;
//! if prober.probe("https://seed.example.org/").await {
//!     let fetcher = RemoteFetcher::with_default_timeout()?;
//!     let password = secret_string("Admin123".to_string());
//!     let stream = fetcher
//!         .fetch("https://seed.example.org/module/testing/getModules.htm", "admin", &password)
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # MySQL Adapter
//!
//! ```rust,no_run
//! use emr_bootstrap::adapters::mysql::DatabaseSeeder;
//! # use emr_bootstrap::domain::DatabaseTarget;
//!
//! # async fn example(target: DatabaseTarget) {
//! let seeder = DatabaseSeeder::new("mysql");
//! if !seeder.apply_sql_dump(&target).await {
//!     eprintln!("Seeding failed, see log for the client's diagnostics");
//! }
//! # }
//! ```

pub mod mysql;
pub mod remote;
