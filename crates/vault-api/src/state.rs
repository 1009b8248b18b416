//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use vault_core::config::AppConfig;
use vault_core::traits::Clock;
use vault_database::Stores;
use vault_service::delivery::EmailSender;
use vault_service::{
    AccountService, ExpirySweep, NotificationService, ReceiptScanner, ReceiptStorage, TextExtractor,
    WarrantyService,
};

/// Everything a handler can reach. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Source of "today" for status, day counts and the sweep.
    pub clock: Arc<dyn Clock>,
    pub accounts: AccountService,
    pub warranties: WarrantyService,
    pub notifications: NotificationService,
    pub sweep: ExpirySweep,
    pub scanner: ReceiptScanner,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("today", &self.clock.today())
            .field("warranties", &self.warranties)
            .field("scanner", &self.scanner)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the services over `stores` and the outbound channels.
    pub fn new(
        config: AppConfig,
        clock: Arc<dyn Clock>,
        stores: Stores,
        email: Arc<dyn EmailSender>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        let accounts = AccountService::new(Arc::clone(&stores.users), &config.auth);
        let warranties = WarrantyService::new(
            Arc::clone(&stores.warranties),
            ReceiptStorage::new(&config.storage),
            Arc::clone(&clock),
        );
        let notifications = NotificationService::new(Arc::clone(&stores.notifications));
        let sweep = ExpirySweep::new(
            Arc::clone(&stores.warranties),
            Arc::clone(&stores.notifications),
            Arc::clone(&stores.users),
            email,
        );
        let scanner = ReceiptScanner::new(extractor, Arc::clone(&clock));

        Self {
            config: Arc::new(config),
            clock,
            accounts,
            warranties,
            notifications,
            sweep,
            scanner,
        }
    }

    /// Absolute URL for a stored receipt path.
    pub fn media_url(&self, relative: &str) -> String {
        format!("{}/media/{}", self.config.server.public_url.trim_end_matches('/'), relative)
    }
}
