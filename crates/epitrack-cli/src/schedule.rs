//! Recurring pipeline runs.
//!
//! Runs once at startup, then on every tick of the cron expression. A failed
//! run is logged and the scheduler keeps going.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::run::{run_once, RunSettings};

/// Run now, register the cron job, and block until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the cron expression is invalid or the scheduler
/// cannot be started.
pub async fn run_schedule(settings: RunSettings, cron: &str) -> anyhow::Result<()> {
    let settings = Arc::new(settings);

    tracing::info!("scheduler: starting initial run");
    run_in_background(Arc::clone(&settings)).await;

    let mut scheduler = JobScheduler::new().await?;
    let job_settings = Arc::clone(&settings);
    let job = Job::new_async(cron, move |_uuid, _lock| {
        let settings = Arc::clone(&job_settings);
        Box::pin(async move {
            tracing::info!("scheduler: starting scheduled run");
            run_in_background(settings).await;
        })
    })?;
    scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(cron, "scheduler: waiting for next tick (Ctrl-C to stop)");

    tokio::signal::ctrl_c().await?;
    tracing::info!("scheduler: received shutdown signal");
    scheduler.shutdown().await?;
    Ok(())
}

/// The pipeline is CPU-bound and synchronous, so it runs on a blocking thread.
async fn run_in_background(settings: Arc<RunSettings>) {
    match tokio::task::spawn_blocking(move || run_once(&settings)).await {
        Ok(Ok(output)) => {
            let rising = output.summaries.iter().filter(|s| s.is_rising).count();
            tracing::info!(
                diseases = output.summaries.len(),
                rising,
                "scheduler: run complete"
            );
        }
        Ok(Err(e)) => tracing::error!(error = %format!("{e:#}"), "scheduler: run failed"),
        Err(e) => tracing::error!(error = %e, "scheduler: run panicked"),
    }
}
