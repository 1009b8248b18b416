//! Warranty Vault server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use vault_api::AppState;
use vault_core::config::AppConfig;
use vault_core::error::AppError;
use vault_core::traits::{Clock, SystemClock};
use vault_database::{DatabasePool, Stores};
use vault_service::delivery::build_sender;
use vault_service::receipt::build_extractor;
use vault_worker::{CronScheduler, ExpiryCheckJob};

#[tokio::main]
async fn main() {
    let env = std::env::var("VAULT_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging. `RUST_LOG` wins over `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Warranty Vault v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Data directory ───────────────────────────────────
    tokio::fs::create_dir_all(&config.storage.data_root)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create '{}': {}", config.storage.data_root, e)))?;

    // ── Step 2: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        vault_database::migration::run_migrations(db.pool()).await?;
    }

    // ── Step 3: Outbound channels ────────────────────────────────
    let email = build_sender(&config.email)?;
    let extractor = build_extractor(&config.ocr)?;
    tracing::info!(
        email = email.name(),
        ocr = extractor.name(),
        "Outbound channels ready"
    );

    if config.cron.secret.as_deref().is_none_or(str::is_empty) {
        tracing::warn!("cron.secret is not set; anyone can trigger /api/cron/check-expiry");
    }

    // ── Step 4: Application state ────────────────────────────────
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let stores = Stores::postgres(db.pool());
    let state = AppState::new(config.clone(), Arc::clone(&clock), stores, email, extractor);

    // ── Step 5: Optional in-process scheduler ────────────────────
    let scheduler = if config.worker.enabled {
        let scheduler = CronScheduler::new().await?;
        let job = ExpiryCheckJob::new(state.sweep.clone(), Arc::clone(&clock));
        scheduler
            .register_expiry_check(&config.worker.expiry_check_cron, job)
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled; expecting external cron trigger");
        None
    };

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app = vault_api::build_app(state);
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Warranty Vault listening on {}", addr);

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 7: Wind down ────────────────────────────────────────
    if let Some(scheduler) = scheduler {
        match tokio::time::timeout(grace, scheduler.shutdown()).await {
            Ok(Err(e)) => tracing::warn!(error = %e, "Scheduler shutdown failed"),
            Err(_) => tracing::warn!("Scheduler did not stop within the grace period"),
            Ok(Ok(())) => {}
        }
    }
    db.close().await;

    tracing::info!("Warranty Vault shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
