//! The daily expiry sweep.
//!
//! For every warranty expiring today or later, the days remaining are mapped
//! to a tier; each `(warranty, tier)` pair produces at most one notice, and
//! every new notice is followed by a best-effort email. Running the sweep
//! twice on the same day creates nothing the second time.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use vault_core::result::AppResult;
use vault_database::store::{NotificationStore, UserStore, WarrantyStore};
use vault_entity::notification::{NewNotification, Notification, NotificationTier};
use vault_entity::warranty::Warranty;

use super::content::{NoticeText, notice_email, notice_text};
use crate::delivery::EmailSender;

/// Totals from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub warranties_scanned: u64,
    pub notifications_created: u64,
    pub emails_sent: u64,
    /// Warranties whose processing failed; the sweep continued past them.
    pub failures: u64,
}

/// What happened to one warranty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    NoTier,
    AlreadyNotified,
    Created { emailed: bool },
}

/// Runs the expiry sweep against the stores and delivery channel.
///
/// Assumes a single sweep runs at a time; the storage-level uniqueness on
/// `(warranty, tier)` keeps results correct even if that is violated.
#[derive(Clone)]
pub struct ExpirySweep {
    warranties: Arc<dyn WarrantyStore>,
    notifications: Arc<dyn NotificationStore>,
    users: Arc<dyn UserStore>,
    email: Arc<dyn EmailSender>,
}

impl std::fmt::Debug for ExpirySweep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpirySweep")
            .field("email", &self.email.name())
            .finish_non_exhaustive()
    }
}

impl ExpirySweep {
    pub fn new(
        warranties: Arc<dyn WarrantyStore>,
        notifications: Arc<dyn NotificationStore>,
        users: Arc<dyn UserStore>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            warranties,
            notifications,
            users,
            email,
        }
    }

    /// Run one sweep as of `today`.
    ///
    /// Only a failure to load the candidate warranties is returned as an
    /// error; anything that goes wrong for a single warranty is logged and
    /// counted in [`SweepReport::failures`].
    pub async fn run_sweep(&self, today: NaiveDate) -> AppResult<SweepReport> {
        let candidates = self.warranties.find_expiring_on_or_after(today).await?;
        let mut report = SweepReport {
            warranties_scanned: candidates.len() as u64,
            ..SweepReport::default()
        };

        for warranty in &candidates {
            match self.process(warranty, today).await {
                Ok(Outcome::Created { emailed }) => {
                    report.notifications_created += 1;
                    if emailed {
                        report.emails_sent += 1;
                    }
                }
                Ok(Outcome::NoTier | Outcome::AlreadyNotified) => {}
                Err(e) => {
                    report.failures += 1;
                    error!(warranty_id = %warranty.id, error = %e, "Sweep failed for warranty");
                }
            }
        }

        info!(
            %today,
            scanned = report.warranties_scanned,
            created = report.notifications_created,
            emailed = report.emails_sent,
            failures = report.failures,
            "Expiry sweep finished"
        );
        Ok(report)
    }

    async fn process(&self, warranty: &Warranty, today: NaiveDate) -> AppResult<Outcome> {
        let Some(expiry) = warranty.expiry_date else {
            return Ok(Outcome::NoTier);
        };
        let days_remaining = (expiry - today).num_days();
        let Some(tier) = NotificationTier::for_days_remaining(days_remaining) else {
            return Ok(Outcome::NoTier);
        };

        if self.notifications.exists_for_tier(warranty.id, tier).await? {
            debug!(warranty_id = %warranty.id, %tier, "Notice already raised");
            return Ok(Outcome::AlreadyNotified);
        }

        let text = notice_text(tier, &warranty.product_name, &warranty.brand, expiry);
        let notification = match self
            .notifications
            .create(NewNotification {
                user_id: warranty.user_id,
                warranty_id: warranty.id,
                tier,
                title: text.title.clone(),
                message: text.message.clone(),
            })
            .await
        {
            Ok(n) => n,
            // Lost a race with another writer for the same tier.
            Err(e) if e.is_conflict() => return Ok(Outcome::AlreadyNotified),
            Err(e) => return Err(e),
        };

        let emailed = self
            .deliver(warranty, &notification, &text, expiry, days_remaining)
            .await;
        Ok(Outcome::Created { emailed })
    }

    /// Send the email copy; any failure is logged and reported as `false`.
    async fn deliver(
        &self,
        warranty: &Warranty,
        notification: &Notification,
        text: &NoticeText,
        expiry: NaiveDate,
        days_remaining: i64,
    ) -> bool {
        let owner = match self.users.find_by_id(warranty.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(user_id = %warranty.user_id, "Warranty owner missing; email skipped");
                return false;
            }
            Err(e) => {
                warn!(user_id = %warranty.user_id, error = %e, "Owner lookup failed; email skipped");
                return false;
            }
        };

        let email = notice_email(&owner.email, text, warranty, expiry, days_remaining);

        if let Err(e) = self.email.send(&email).await {
            warn!(
                notification_id = %notification.id,
                to = %owner.email,
                provider = self.email.name(),
                error = %e,
                "Email delivery failed"
            );
            return false;
        }

        if let Err(e) = self.notifications.mark_email_sent(notification.id).await {
            warn!(notification_id = %notification.id, error = %e, "Failed to flag email as sent");
        }
        true
    }
}
