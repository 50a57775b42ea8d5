//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use manara_cache::provider::CacheManager;
use manara_core::config::AppConfig;
use manara_database::repositories::{ChangeLogRepository, SnapshotRepositories};
use manara_service::{
    ChangeLogService, RestoreRegistry, SlotStore, TrackedMutationService, UndoService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Cache manager (Redis or in-memory) holding the undo slots
    pub cache: Arc<CacheManager>,

    // ── Services ─────────────────────────────────────────────
    /// Change capture and one-click undo
    pub undo_service: Arc<UndoService>,
    /// Change-log listing and revert
    pub change_log_service: Arc<ChangeLogService>,
    /// Tracked admin updates and deletes
    pub mutation_service: Arc<TrackedMutationService>,
}

impl AppState {
    /// Wire the services on top of PostgreSQL and the configured cache.
    pub fn build(config: AppConfig, pool: PgPool, cache: Arc<CacheManager>) -> Self {
        let repositories = SnapshotRepositories::new(pool.clone());
        let registry = Arc::new(RestoreRegistry::new(|t| repositories.for_type(t)));
        let change_logs = Arc::new(ChangeLogRepository::new(pool));

        let slots = SlotStore::new(
            cache.provider(),
            Duration::from_secs(config.undo.slot_ttl_minutes * 60),
        );

        let undo_service = Arc::new(UndoService::new(
            registry,
            change_logs.clone(),
            slots,
            config.undo.strict_logging,
        ));
        let change_log_service = Arc::new(ChangeLogService::new(
            change_logs,
            Arc::clone(&undo_service),
            config.undo.default_page_size,
        ));
        let mutation_service = Arc::new(TrackedMutationService::new(Arc::clone(&undo_service)));

        Self {
            config: Arc::new(config),
            cache,
            undo_service,
            change_log_service,
            mutation_service,
        }
    }
}
