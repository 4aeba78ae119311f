//! Cleanup Engine
//!
//! Age-based sweeping of the storage subtrees and the round loop around it.

mod round;
mod scheduler;
mod sweeper;

pub use round::RoundRunner;
pub use scheduler::{CleanupRound, RunSummary, Scheduler, ShutdownSignal};
pub use sweeper::sweep;
