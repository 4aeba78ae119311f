//! Files Cleaner - retention sweeper for a file storage root
//!
//! Periodically deletes files under `{root}/images` and `{root}/pdf` once
//! they outlive a per-directory TTL.

pub mod cleanup;
pub mod config;
pub mod error;
pub mod logging;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use cleanup::{sweep, CleanupRound, RoundRunner, RunSummary, Scheduler};
pub use config::{RetentionConfig, Settings};
pub use error::{ConfigError, EntryError};
pub use stats::SweepStats;
