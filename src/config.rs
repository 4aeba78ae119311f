//! Configuration
//!
//! `Settings` is the raw, environment-facing view (hours, strings).
//! `RetentionConfig` is the resolved value handed to the cleanup core.

use std::path::{Path, PathBuf};

use clap::builder::BoolishValueParser;
use clap::Parser;
use tracing::Level;

use crate::error::ConfigError;
use crate::logging;

const SECS_PER_HOUR: u64 = 3600;

const ENV_FILE: &str = ".env";

/// Subdirectory of the root holding images
pub const IMAGES_SUBDIR: &str = "images";

/// Subdirectory of the root holding PDF files
pub const PDF_SUBDIR: &str = "pdf";

/// Files cleaner settings, read from the environment (and `.env`)
#[derive(Parser, Debug, Clone)]
#[command(name = "files-cleaner", author, version, about)]
pub struct Settings {
    /// Root containing the `images/` and `pdf/` subtrees
    #[arg(long, env = "FILES_ROOT", default_value = "/data_files_storage")]
    pub files_root: PathBuf,

    /// Hours an image is retained
    #[arg(long, env = "IMAGES_TTL_HOURS", default_value_t = 1)]
    pub images_ttl_hours: u64,

    /// Hours a PDF file is retained
    #[arg(long, env = "PDF_TTL_HOURS", default_value_t = 24)]
    pub pdf_ttl_hours: u64,

    /// Seconds between cleanup rounds
    #[arg(
        long,
        env = "CHECK_INTERVAL_SECONDS",
        default_value_t = 600,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub check_interval_seconds: u64,

    /// Log verbosity; unknown values fall back to INFO
    #[arg(long, env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,

    /// Run a single round and exit
    #[arg(long, env = "ONESHOT", value_parser = BoolishValueParser::new())]
    pub oneshot: bool,
}

impl Settings {
    /// Load `.env` (if present) and parse settings from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        load_env_file(Path::new(ENV_FILE))?;
        Ok(Self::parse())
    }

    /// Effective logging level
    pub fn level(&self) -> Level {
        logging::parse_level(&self.log_level)
    }

    /// Resolve into the config consumed by the cleanup core, converting
    /// TTL hours into seconds.
    pub fn to_retention_config(&self) -> Result<RetentionConfig, ConfigError> {
        let config = RetentionConfig::default()
            .with_root(&self.files_root)
            .with_images_ttl(hours_to_secs("IMAGES_TTL_HOURS", self.images_ttl_hours)?)
            .with_pdf_ttl(hours_to_secs("PDF_TTL_HOURS", self.pdf_ttl_hours)?)
            .with_interval(self.check_interval_seconds)
            .with_oneshot(self.oneshot);
        config.validate()?;
        Ok(config)
    }
}

/// Export variables from `path` that are not already set. A missing file
/// is fine; a malformed one is an error.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Err(e) if e.not_found() => Ok(()),
        other => other.map_err(ConfigError::from),
    }
}

fn hours_to_secs(name: &'static str, hours: u64) -> Result<u64, ConfigError> {
    hours
        .checked_mul(SECS_PER_HOUR)
        .ok_or(ConfigError::TtlOverflow { name, hours })
}

/// Resolved retention configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionConfig {
    /// Storage root
    pub root: PathBuf,

    /// Image TTL in seconds (0 = expire everything)
    pub images_ttl_secs: u64,

    /// PDF TTL in seconds (0 = expire everything)
    pub pdf_ttl_secs: u64,

    /// Seconds between rounds, always positive
    pub interval_secs: u64,

    /// Run exactly one round
    pub oneshot: bool,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/data_files_storage"),
            images_ttl_secs: SECS_PER_HOUR,
            pdf_ttl_secs: 24 * SECS_PER_HOUR,
            interval_secs: 600,
            oneshot: false,
        }
    }
}

impl RetentionConfig {
    pub fn with_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_images_ttl(mut self, secs: u64) -> Self {
        self.images_ttl_secs = secs;
        self
    }

    pub fn with_pdf_ttl(mut self, secs: u64) -> Self {
        self.pdf_ttl_secs = secs;
        self
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs;
        self
    }

    pub fn with_oneshot(mut self, oneshot: bool) -> Self {
        self.oneshot = oneshot;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_SUBDIR)
    }

    pub fn pdf_dir(&self) -> PathBuf {
        self.root.join(PDF_SUBDIR)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
