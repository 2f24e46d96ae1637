// ABOUTME: Command implementations for the CLI surface
// ABOUTME: Exports migrate and check commands

pub mod check;
pub mod migrate;

pub use check::check;
pub use migrate::{migrate, MigrationOutcome, MigrationRunner};
