//! Round Scheduler
//!
//! Runs cleanup rounds back to back with a fixed pause in between. Rounds
//! run to completion on the calling thread; only the pause is interruptible.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::time::Duration;

use tokio::task::yield_now;
use tokio::time::sleep;
use tracing::info;

use crate::config::RetentionConfig;
use crate::stats::SweepStats;

/// A single cleanup pass
pub trait CleanupRound {
    fn run_round(&mut self) -> SweepStats;
}

/// What the scheduler did before it stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rounds completed
    pub rounds: u64,
    /// Sum of every round's stats
    pub totals: SweepStats,
    /// Stopped by a shutdown signal rather than one-shot completion
    pub interrupted: bool,
}

/// Interval / one-shot loop around a [`CleanupRound`]
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    oneshot: bool,
}

impl Scheduler {
    pub fn new(interval_secs: u64, oneshot: bool) -> Self {
        Self {
            interval: Duration::from_secs(interval_secs),
            oneshot,
        }
    }

    pub fn from_config(config: &RetentionConfig) -> Self {
        Self::new(config.interval_secs, config.oneshot)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run until one-shot completes or SIGINT / SIGTERM arrives.
    ///
    /// Signal handlers are installed before the first round starts, so an
    /// interrupt at any point stops the loop gracefully.
    pub async fn run<R: CleanupRound>(&self, round: &mut R) -> io::Result<RunSummary> {
        let mut signals = ShutdownSignal::install()?;
        Ok(self.run_until(round, signals.recv()).await)
    }

    /// Run until one-shot completes or `shutdown` resolves. A shutdown that
    /// arrives mid-round takes effect once that round finishes.
    pub async fn run_until<R, F>(&self, round: &mut R, shutdown: F) -> RunSummary
    where
        R: CleanupRound,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut summary = RunSummary::default();

        loop {
            summary.totals += round.run_round();
            summary.rounds += 1;

            if self.oneshot {
                if already_fired(shutdown.as_mut()).await {
                    info!("Received shutdown signal, shutting down");
                    summary.interrupted = true;
                } else {
                    info!("ONESHOT mode enabled, exiting after single round");
                }
                break;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Received shutdown signal, shutting down");
                    summary.interrupted = true;
                    break;
                }
                _ = sleep(self.interval) => {}
            }
        }

        summary
    }
}

/// Whether `shutdown` has resolved, without waiting for it. Yields once
/// first so the runtime can process signals delivered during a round.
async fn already_fired<F: Future<Output = ()>>(shutdown: Pin<&mut F>) -> bool {
    yield_now().await;
    tokio::select! {
        biased;
        _ = shutdown => true,
        _ = std::future::ready(()) => false,
    }
}

/// Process-wide interrupt listener (SIGINT and SIGTERM on unix, Ctrl-C
/// elsewhere). Handlers are registered on construction.
#[derive(Debug)]
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
    #[cfg(windows)]
    ctrl_c: tokio::signal::windows::CtrlC,
}

impl ShutdownSignal {
    /// Must be called from within a tokio runtime
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Must be called from within a tokio runtime
    #[cfg(windows)]
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    /// Resolves on the next signal
    #[cfg(unix)]
    pub async fn recv(&mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => {},
            _ = self.terminate.recv() => {},
        }
    }

    /// Resolves on the next signal
    #[cfg(windows)]
    pub async fn recv(&mut self) {
        self.ctrl_c.recv().await;
    }
}
