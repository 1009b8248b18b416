//! Optional in-process scheduling for Warranty Vault.
//!
//! The expiry sweep is normally triggered over HTTP by an external cron.
//! With `worker.enabled = true` the server also runs it on
//! `worker.expiry_check_cron` through [`CronScheduler`].

pub mod jobs;
pub mod scheduler;

pub use jobs::ExpiryCheckJob;
pub use scheduler::CronScheduler;
