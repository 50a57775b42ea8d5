//! Restore dispatch: one handler per tracked model type.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use manara_core::error::AppError;
use manara_core::result::AppResult;
use manara_core::traits::SnapshotRepository;
use manara_core::types::{ModelType, Snapshot};

/// Turns a snapshot back into a persisted record.
#[async_trait]
pub trait RestoreHandler: Send + Sync + 'static {
    /// Apply `snapshot` and return the admin URL to land on afterwards.
    ///
    /// A blank URL signals a misconfigured handler and is treated as a
    /// failed restore by the caller.
    async fn restore(&self, snapshot: &Snapshot) -> AppResult<String>;
}

/// Restores a per-id record: updates it in place when it still exists,
/// otherwise re-creates it under its original identifier.
pub struct RecordRestoreHandler {
    repo: Arc<dyn SnapshotRepository>,
}

impl RecordRestoreHandler {
    pub fn new(repo: Arc<dyn SnapshotRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RestoreHandler for RecordRestoreHandler {
    async fn restore(&self, snapshot: &Snapshot) -> AppResult<String> {
        let model_type = self.repo.model_type();
        let id = snapshot.id().ok_or_else(|| {
            AppError::validation(format!("{model_type} snapshot has no valid 'id' field"))
        })?;

        let updated = self.repo.exists(Some(id)).await?
            && self.repo.update_from_snapshot(snapshot).await?;

        let restored_id = if updated {
            info!(%model_type, model_id = id, "Record restored in place");
            Some(id)
        } else {
            let new_id = self.repo.insert_from_snapshot(snapshot).await?;
            info!(%model_type, model_id = ?new_id, "Deleted record re-created");
            new_id
        };

        Ok(model_type.restore_url(restored_id))
    }
}

/// Restores a singleton record by upserting it.
pub struct SingletonRestoreHandler {
    repo: Arc<dyn SnapshotRepository>,
}

impl SingletonRestoreHandler {
    pub fn new(repo: Arc<dyn SnapshotRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RestoreHandler for SingletonRestoreHandler {
    async fn restore(&self, snapshot: &Snapshot) -> AppResult<String> {
        let model_type = self.repo.model_type();
        self.repo.update_from_snapshot(snapshot).await?;
        info!(%model_type, "Singleton restored");
        Ok(model_type.restore_url(None))
    }
}

/// Handler and repository for every tracked model type.
#[derive(Clone)]
pub struct RestoreRegistry {
    repositories: HashMap<ModelType, Arc<dyn SnapshotRepository>>,
    handlers: HashMap<ModelType, Arc<dyn RestoreHandler>>,
}

impl fmt::Debug for RestoreRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.handlers.keys().map(ModelType::as_str).collect();
        types.sort_unstable();
        f.debug_struct("RestoreRegistry").field("types", &types).finish()
    }
}

impl RestoreRegistry {
    /// Build the registry from a repository factory, registering the
    /// default handler for every [`ModelType`].
    pub fn new(repository_for: impl Fn(ModelType) -> Arc<dyn SnapshotRepository>) -> Self {
        let mut repositories = HashMap::new();
        let mut handlers = HashMap::new();
        for model_type in ModelType::ALL {
            let repo = repository_for(model_type);
            handlers.insert(model_type, default_handler(model_type, repo.clone()));
            repositories.insert(model_type, repo);
        }
        Self {
            repositories,
            handlers,
        }
    }

    /// Replace the handler for one model type.
    pub fn with_handler(mut self, model_type: ModelType, handler: Arc<dyn RestoreHandler>) -> Self {
        self.handlers.insert(model_type, handler);
        self
    }

    /// Remove the handler for one model type; restores of it then report
    /// the type as unknown.
    pub fn without_handler(mut self, model_type: ModelType) -> Self {
        self.handlers.remove(&model_type);
        self
    }

    /// The restore handler for `model_type`, if one is registered.
    pub fn handler(&self, model_type: ModelType) -> Option<&Arc<dyn RestoreHandler>> {
        self.handlers.get(&model_type)
    }

    /// The snapshot repository for `model_type`.
    pub fn repository(&self, model_type: ModelType) -> AppResult<&Arc<dyn SnapshotRepository>> {
        self.repositories
            .get(&model_type)
            .ok_or_else(|| AppError::unknown_model_type(model_type.as_str()))
    }
}

/// Every variant must be listed here; a new [`ModelType`] does not compile
/// until it has a restore strategy.
fn default_handler(
    model_type: ModelType,
    repo: Arc<dyn SnapshotRepository>,
) -> Arc<dyn RestoreHandler> {
    match model_type {
        ModelType::Settings => Arc::new(SingletonRestoreHandler::new(repo)),
        ModelType::Product
        | ModelType::Career
        | ModelType::Application
        | ModelType::Certificate
        | ModelType::SiteContent
        | ModelType::Media => Arc::new(RecordRestoreHandler::new(repo)),
    }
}
