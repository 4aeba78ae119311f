//! Sweep Statistics
//!
//! Per-sweep and per-round counters.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Counters produced by one sweep (or the sum of several)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Non-directory entries visited
    pub scanned: u64,
    /// Entries removed because they outlived their TTL
    pub deleted: u64,
    /// Stat, delete or enumeration failures
    pub errors: u64,
}

impl SweepStats {
    pub fn new(scanned: u64, deleted: u64, errors: u64) -> Self {
        Self {
            scanned,
            deleted,
            errors,
        }
    }

    /// True when nothing was visited and nothing failed
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for SweepStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            scanned: self.scanned + rhs.scanned,
            deleted: self.deleted + rhs.deleted,
            errors: self.errors + rhs.errors,
        }
    }
}

impl AddAssign for SweepStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for SweepStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for SweepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scanned={}, deleted={}, errors={}",
            self.scanned, self.deleted, self.errors
        )
    }
}
