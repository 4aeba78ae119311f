//! Cleanup Round
//!
//! One full pass over the `images` and `pdf` subtrees.

use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use super::scheduler::CleanupRound;
use super::sweeper::sweep;
use crate::config::RetentionConfig;
use crate::stats::SweepStats;

/// Runs cleanup rounds against a fixed configuration
#[derive(Debug, Clone)]
pub struct RoundRunner {
    config: RetentionConfig,
}

impl RoundRunner {
    pub fn new(config: RetentionConfig) -> Self {
        Self { config }
    }

    /// Run one round with both subtrees aged against the same `now`
    pub fn run_round_at(&self, now: SystemTime) -> SweepStats {
        let started: DateTime<Utc> = now.into();
        info!(
            root = %self.config.root.display(),
            at = %started.to_rfc3339_opts(SecondsFormat::Secs, true),
            "Cleanup round started"
        );

        let images = sweep(&self.config.images_dir(), self.config.images_ttl_secs, now);
        let pdf = sweep(&self.config.pdf_dir(), self.config.pdf_ttl_secs, now);
        let total = images + pdf;

        info!(
            scanned = total.scanned,
            deleted = total.deleted,
            errors = total.errors,
            "Cleanup round finished"
        );

        total
    }
}

impl CleanupRound for RoundRunner {
    fn run_round(&mut self) -> SweepStats {
        self.run_round_at(SystemTime::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{touch, with_captured_logs};
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    const HOUR: u64 = 3600;

    #[test]
    fn test_images_expire_by_hours() {
        let root = tempdir().unwrap();
        let now = SystemTime::now();
        let a = root.path().join("images/a.jpg");
        let b = root.path().join("images/b.jpg");
        touch(&a, now, Duration::from_secs(2 * HOUR));
        touch(&b, now, Duration::from_secs(30 * 60));

        let runner = RoundRunner::new(
            RetentionConfig::default()
                .with_root(root.path())
                .with_images_ttl(HOUR),
        );
        let stats = runner.run_round_at(now);

        assert_eq!(stats, SweepStats::new(2, 1, 0));
        assert!(!a.exists());
        assert!(b.exists());
    }

    #[test]
    fn test_missing_pdf_dir_is_logged_and_ignored() {
        let root = tempdir().unwrap();
        let now = SystemTime::now();
        for name in ["x.jpg", "y.jpg", "z.jpg"] {
            touch(&root.path().join("images").join(name), now, Duration::from_secs(5 * HOUR));
        }

        let runner = RoundRunner::new(RetentionConfig::default().with_root(root.path()));
        let (stats, logs) = with_captured_logs(|| runner.run_round_at(now));

        assert_eq!(stats, SweepStats::new(3, 3, 0));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Directory does not exist"));
        assert!(logs.contains("Cleanup round finished"));
        assert!(logs.contains("deleted=3"));
    }

    #[test]
    fn test_total_is_sum_of_both_subtrees() {
        let root = tempdir().unwrap();
        let now = SystemTime::now();
        touch(&root.path().join("images/old.jpg"), now, Duration::from_secs(3 * HOUR));
        touch(&root.path().join("images/new.jpg"), now, Duration::from_secs(60));
        touch(&root.path().join("pdf/2024/old.pdf"), now, Duration::from_secs(30 * HOUR));
        touch(&root.path().join("pdf/new.pdf"), now, Duration::from_secs(3 * HOUR));

        let config = RetentionConfig::default().with_root(root.path());
        let stats = RoundRunner::new(config).run_round_at(now);

        assert_eq!(stats, SweepStats::new(2, 1, 0) + SweepStats::new(2, 1, 0));
        assert!(root.path().join("pdf/new.pdf").exists());
        assert!(!root.path().join("pdf/2024/old.pdf").exists());
    }

    #[test]
    fn test_both_subtrees_share_one_timestamp() {
        let root = tempdir().unwrap();
        let image = root.path().join("images/a.jpg");
        let pdf = root.path().join("pdf/a.pdf");
        let base = SystemTime::now();
        touch(&image, base, Duration::from_secs(10));
        touch(&pdf, base, Duration::from_secs(10));

        let image_mtime = fs::metadata(&image).unwrap().modified().unwrap();
        let pdf_mtime = fs::metadata(&pdf).unwrap().modified().unwrap();
        assert_eq!(image_mtime, pdf_mtime);

        // Both files sit exactly at their TTL for this instant
        let now = image_mtime + Duration::from_secs(HOUR);
        let config = RetentionConfig::default()
            .with_root(root.path())
            .with_images_ttl(HOUR)
            .with_pdf_ttl(HOUR);
        let stats = RoundRunner::new(config).run_round_at(now);

        assert_eq!(stats, SweepStats::new(2, 0, 0));
        assert!(image.exists() && pdf.exists());
    }

    #[test]
    fn test_empty_root() {
        let root = tempdir().unwrap();
        let mut runner = RoundRunner::new(RetentionConfig::default().with_root(root.path()));
        assert!(runner.run_round().is_empty());
    }
}
