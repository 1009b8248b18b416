//! Cron scheduler for the in-process expiry check.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;

use crate::jobs::ExpiryCheckJob;

/// Wraps a [`JobScheduler`] with the jobs Warranty Vault knows about.
pub struct CronScheduler {
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    pub async fn new() -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;
        Ok(Self { scheduler })
    }

    /// Run `job` on the six-field cron expression `cron` (UTC).
    pub async fn register_expiry_check(&self, cron: &str, job: ExpiryCheckJob) -> AppResult<()> {
        let job = Arc::new(job);
        let cron_job = CronJob::new_async(cron, move |_uuid, _lock| {
            let job = Arc::clone(&job);
            Box::pin(async move {
                match job.run().await {
                    Ok(report) => tracing::info!(
                        created = report.notifications_created,
                        emailed = report.emails_sent,
                        failures = report.failures,
                        "Scheduled expiry check finished"
                    ),
                    Err(e) => tracing::error!(error = %e, "Scheduled expiry check failed"),
                }
            })
        })
        .map_err(|e| {
            AppError::new(
                ErrorKind::Configuration,
                format!("Invalid worker.expiry_check_cron '{cron}': {e}"),
            )
        })?;

        self.scheduler
            .add(cron_job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add expiry_check schedule: {e}")))?;

        tracing::info!(cron, "Registered: expiry_check");
        Ok(())
    }

    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;
        tracing::info!("Cron scheduler started");
        Ok(())
    }

    pub async fn shutdown(&self) -> AppResult<()> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;
        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
