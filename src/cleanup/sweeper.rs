//! Directory Sweeper
//!
//! Walks one directory tree and deletes every non-directory entry whose
//! last modification is older than the TTL.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{debug, error, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::EntryError;
use crate::stats::SweepStats;

/// What happened to a single non-directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Retained,
    Deleted { age: Duration },
}

/// Sweep `dir`, deleting entries older than `ttl_secs` relative to `now`.
///
/// A missing directory, or a path that is not a directory, yields zero
/// stats. Per-entry failures are counted in `errors` and never stop the
/// walk.
pub fn sweep(dir: &Path, ttl_secs: u64, now: SystemTime) -> SweepStats {
    let mut stats = SweepStats::default();

    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            warn!(path = %dir.display(), "Path is not a directory, skipping");
            return stats;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %dir.display(), "Directory does not exist, skipping");
            return stats;
        }
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Directory is not accessible, skipping");
            return stats;
        }
    }

    let ttl = Duration::from_secs(ttl_secs);

    for entry in WalkDir::new(dir).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                stats.errors += 1;
                warn!(error = %EntryError::from(e), "Failed to read directory entry");
                continue;
            }
        };

        if is_dir_like(&entry) {
            continue;
        }

        stats.scanned += 1;

        match process_entry(entry.path(), ttl, now) {
            Ok(Outcome::Retained) => {}
            Ok(Outcome::Deleted { age }) => {
                stats.deleted += 1;
                debug!(
                    path = %entry.path().display(),
                    age_secs = age.as_secs(),
                    ttl_secs,
                    "Deleted file"
                );
            }
            Err(e @ EntryError::Delete { .. }) => {
                stats.errors += 1;
                error!(error = %e, "Failed to delete file");
            }
            Err(e) => {
                stats.errors += 1;
                warn!(error = %e, "Failed to stat file");
            }
        }
    }

    stats
}

/// Directories, and symlinks pointing at directories, are never candidates
fn is_dir_like(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir() {
        return true;
    }
    entry.path_is_symlink()
        && fs::metadata(entry.path())
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
}

fn process_entry(path: &Path, ttl: Duration, now: SystemTime) -> Result<Outcome, EntryError> {
    let mtime = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|source| EntryError::Stat {
            path: path.to_path_buf(),
            source,
        })?;

    // mtime in the future: negative age
    let Ok(age) = now.duration_since(mtime) else {
        return Ok(Outcome::Retained);
    };

    if age <= ttl {
        return Ok(Outcome::Retained);
    }

    fs::remove_file(path).map_err(|source| EntryError::Delete {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Outcome::Deleted { age })
}
