//! MySQL client integration
//!
//! Seeding goes through the `mysql` command-line client rather than a driver,
//! so a dump is applied exactly as an operator would apply it by hand.

pub mod seeder;

pub use seeder::{DatabaseSeeder, SeedReport, DEFAULT_CLIENT_BINARY, LINE_SEPARATOR};
