//! Daily warranty expiry check.

use std::sync::Arc;

use vault_core::result::AppResult;
use vault_core::traits::Clock;
use vault_service::{ExpirySweep, SweepReport};

/// Runs the expiry sweep for the clock's current date.
#[derive(Clone)]
pub struct ExpiryCheckJob {
    sweep: ExpirySweep,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ExpiryCheckJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiryCheckJob")
            .field("sweep", &self.sweep)
            .finish_non_exhaustive()
    }
}

impl ExpiryCheckJob {
    pub fn new(sweep: ExpirySweep, clock: Arc<dyn Clock>) -> Self {
        Self { sweep, clock }
    }

    /// Run once. Errors are returned to the caller; the scheduler logs them.
    pub async fn run(&self) -> AppResult<SweepReport> {
        let today = self.clock.today();
        tracing::info!(%today, "Running scheduled expiry check");
        self.sweep.run_sweep(today).await
    }
}
