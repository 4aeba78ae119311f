//! Files Cleaner Binary
//!
//! Loads settings from the environment and runs cleanup rounds until
//! one-shot completion or an interrupt.

use files_cleaner::{logging, RoundRunner, Scheduler, Settings};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    logging::init(settings.level());

    info!(?settings, "files-cleaner starting");

    let config = settings.to_retention_config()?;
    let scheduler = Scheduler::from_config(&config);
    let mut runner = RoundRunner::new(config);

    let summary = scheduler.run(&mut runner).await?;

    info!(
        rounds = summary.rounds,
        scanned = summary.totals.scanned,
        deleted = summary.totals.deleted,
        errors = summary.totals.errors,
        interrupted = summary.interrupted,
        "files-cleaner stopped"
    );

    Ok(())
}
