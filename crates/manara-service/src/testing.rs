//! In-memory implementations of the storage seams, for tests and local
//! experiments without Postgres.
//!
//! [`TestServices`] wires the real undo, change-log and mutation services
//! to these fakes and to a moka-backed cache.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use manara_cache::memory::MemoryCacheProvider;
use manara_core::config::cache::MemoryCacheConfig;
use manara_core::error::AppError;
use manara_core::result::AppResult;
use manara_core::traits::{CacheProvider, SnapshotRepository};
use manara_core::types::model_type::SETTINGS_ROW_ID;
use manara_core::types::pagination::{PageRequest, PageResponse};
use manara_core::types::{ModelType, Snapshot};
use manara_entity::change_log::{ChangeLogEntry, ChangeLogFilter, ChangeState, CreateChangeLogEntry};
use sqlx::types::Json;

use crate::change_log::ChangeLogService;
use crate::mutation::TrackedMutationService;
use crate::undo::{ChangeLogStore, RestoreRegistry, SlotStore, UndoService};

/// Change log kept in a vector, oldest first.
#[derive(Debug, Default)]
pub struct MemoryChangeLogStore {
    entries: Mutex<Vec<ChangeLogEntry>>,
    fail_appends: AtomicBool,
}

impl MemoryChangeLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent append fail with a database error.
    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// All entries, oldest first.
    pub async fn entries(&self) -> Vec<ChangeLogEntry> {
        self.entries.lock().await.clone()
    }

    /// Overwrite the creation time of an entry.
    pub async fn backdate(&self, id: Uuid, created_at: DateTime<Utc>) {
        if let Some(e) = self.entries.lock().await.iter_mut().find(|e| e.id == id) {
            e.created_at = created_at;
        }
    }
}

#[async_trait]
impl ChangeLogStore for MemoryChangeLogStore {
    async fn append(&self, entry: &CreateChangeLogEntry) -> AppResult<ChangeLogEntry> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(AppError::database("change log unavailable"));
        }
        let mut entries = self.entries.lock().await;
        let mut created_at = Utc::now();
        if let Some(last) = entries.last() {
            if created_at <= last.created_at {
                created_at = last.created_at + chrono::Duration::microseconds(1);
            }
        }
        let logged = ChangeLogEntry {
            id: Uuid::new_v4(),
            model_type: entry.model_type.as_str().to_string(),
            model_id: entry.model_id,
            action: entry.action,
            changed_by: entry.changed_by,
            old_data: Json(entry.old_data.clone()),
            new_data: entry.new_data.clone().map(Json),
            created_at,
            reverted_at: None,
            reverted_by: None,
        };
        entries.push(logged.clone());
        Ok(logged)
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<ChangeLogEntry>> {
        Ok(self.entries.lock().await.iter().find(|e| e.id == id).cloned())
    }

    async fn latest_active(
        &self,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<Option<ChangeLogEntry>> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .filter(|e| {
                e.model_type == model_type.as_str() && e.model_id == model_id && !e.is_reverted()
            })
            .max_by_key(|e| (e.created_at, e.id))
            .cloned())
    }

    async fn search(
        &self,
        filter: &ChangeLogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ChangeLogEntry>> {
        let since = filter.period.map(|p| p.since(Utc::now()));
        let mut matching: Vec<ChangeLogEntry> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|e| filter.model_type.is_none_or(|t| e.model_type == t.as_str()))
            .filter(|e| filter.model_id.is_none_or(|id| e.model_id == Some(id)))
            .filter(|e| filter.changed_by.is_none_or(|u| e.changed_by == Some(u)))
            .filter(|e| since.is_none_or(|s| e.created_at >= s))
            .filter(|e| match filter.state {
                Some(ChangeState::Active) => !e.is_reverted(),
                Some(ChangeState::Reverted) => e.is_reverted(),
                None => true,
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn mark_reverted(&self, id: Uuid, reverted_by: Option<Uuid>) -> AppResult<bool> {
        let mut entries = self.entries.lock().await;
        match entries.iter_mut().find(|e| e.id == id && !e.is_reverted()) {
            Some(e) => {
                e.reverted_at = Some(Utc::now());
                e.reverted_by = reverted_by;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn release_revert(&self, id: Uuid, reverted_by: Option<Uuid>) -> AppResult<bool> {
        let mut entries = self.entries.lock().await;
        match entries
            .iter_mut()
            .find(|e| e.id == id && e.is_reverted() && e.reverted_by == reverted_by)
        {
            Some(e) => {
                e.reverted_at = None;
                e.reverted_by = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() != before)
    }

    async fn purge_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|e| e.created_at >= cutoff);
        Ok((before - entries.len()) as u64)
    }
}

/// Records of one model type held as snapshots keyed by id.
///
/// Singleton types keep their single row under [`SETTINGS_ROW_ID`].
#[derive(Debug)]
pub struct MemorySnapshotRepository {
    model_type: ModelType,
    rows: Mutex<BTreeMap<i64, Snapshot>>,
    fail_writes: AtomicBool,
}

impl MemorySnapshotRepository {
    pub fn new(model_type: ModelType) -> Self {
        Self {
            model_type,
            rows: Mutex::new(BTreeMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Seed a record. The snapshot must carry an `id`, except for singletons.
    pub async fn seed(&self, snapshot: Snapshot) -> AppResult<()> {
        let id = self.key(snapshot.id())?;
        self.rows.lock().await.insert(id, snapshot);
        Ok(())
    }

    /// Make every subsequent update, insert and delete fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The stored snapshot of a record.
    pub async fn record(&self, id: Option<i64>) -> Option<Snapshot> {
        let key = self.key(id).ok()?;
        self.rows.lock().await.get(&key).cloned()
    }

    /// Number of stored records.
    pub async fn count(&self) -> usize {
        self.rows.lock().await.len()
    }

    fn key(&self, id: Option<i64>) -> AppResult<i64> {
        if self.model_type.is_singleton() {
            return Ok(SETTINGS_ROW_ID);
        }
        id.ok_or_else(|| AppError::validation(format!("{} requires an id", self.model_type)))
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::database(format!("{} table unavailable", self.model_type)));
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotRepository for MemorySnapshotRepository {
    fn model_type(&self) -> ModelType {
        self.model_type
    }

    async fn load_snapshot(&self, id: Option<i64>) -> AppResult<Option<Snapshot>> {
        let key = self.key(id)?;
        Ok(self.rows.lock().await.get(&key).cloned())
    }

    async fn exists(&self, id: Option<i64>) -> AppResult<bool> {
        let key = self.key(id)?;
        Ok(self.rows.lock().await.contains_key(&key))
    }

    async fn update_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<bool> {
        self.check_writable()?;
        snapshot.validate_for(self.model_type)?;
        let key = self.key(snapshot.id())?;
        let mut rows = self.rows.lock().await;
        if self.model_type.is_singleton() || rows.contains_key(&key) {
            rows.insert(key, snapshot.clone());
            return Ok(true);
        }
        Ok(false)
    }

    async fn insert_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<Option<i64>> {
        self.check_writable()?;
        snapshot.validate_for(self.model_type)?;
        let key = self.key(snapshot.id())?;
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&key) && !self.model_type.is_singleton() {
            return Err(AppError::conflict(format!(
                "{} #{key} already exists",
                self.model_type.label()
            )));
        }
        rows.insert(key, snapshot.clone());
        Ok((!self.model_type.is_singleton()).then_some(key))
    }

    async fn delete(&self, id: Option<i64>) -> AppResult<bool> {
        self.check_writable()?;
        if self.model_type.is_singleton() {
            return Err(AppError::validation(format!(
                "{} cannot be deleted",
                self.model_type.label()
            )));
        }
        let key = self.key(id)?;
        Ok(self.rows.lock().await.remove(&key).is_some())
    }
}

/// The real services wired to in-memory storage.
#[derive(Debug, Clone)]
pub struct TestServices {
    pub log: Arc<MemoryChangeLogStore>,
    pub cache: Arc<dyn CacheProvider>,
    pub undo: Arc<UndoService>,
    pub change_logs: Arc<ChangeLogService>,
    pub mutations: Arc<TrackedMutationService>,
    repositories: HashMap<ModelType, Arc<MemorySnapshotRepository>>,
}

impl TestServices {
    /// Services with soft-fail logging and every default restore handler.
    pub fn new() -> Self {
        Self::build(false, |registry| registry)
    }

    /// Services with custom logging strictness and restore registry.
    pub fn build(
        strict_logging: bool,
        customize: impl FnOnce(RestoreRegistry) -> RestoreRegistry,
    ) -> Self {
        let repositories: HashMap<ModelType, Arc<MemorySnapshotRepository>> = ModelType::ALL
            .into_iter()
            .map(|t| (t, Arc::new(MemorySnapshotRepository::new(t))))
            .collect();

        let registry = RestoreRegistry::new(|t| {
            let repo = repositories
                .get(&t)
                .cloned()
                .unwrap_or_else(|| Arc::new(MemorySnapshotRepository::new(t)));
            repo as Arc<dyn SnapshotRepository>
        });
        let registry = Arc::new(customize(registry));

        let log = Arc::new(MemoryChangeLogStore::new());
        let cache: Arc<dyn CacheProvider> =
            Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig::default(), 7200));
        let slots = SlotStore::new(cache.clone(), Duration::from_secs(7200));

        let undo = Arc::new(UndoService::new(
            registry,
            log.clone(),
            slots,
            strict_logging,
        ));
        let change_logs = Arc::new(ChangeLogService::new(log.clone(), undo.clone(), 25));
        let mutations = Arc::new(TrackedMutationService::new(undo.clone()));

        Self {
            log,
            cache,
            undo,
            change_logs,
            mutations,
            repositories,
        }
    }

    /// The in-memory repository backing `model_type`.
    pub fn repo(&self, model_type: ModelType) -> Arc<MemorySnapshotRepository> {
        match self.repositories.get(&model_type) {
            Some(repo) => repo.clone(),
            None => Arc::new(MemorySnapshotRepository::new(model_type)),
        }
    }
}

impl Default for TestServices {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete snapshot for `model_type` with every trackable field set to
/// a placeholder derived from the field name.
pub fn sample_snapshot(model_type: ModelType, id: i64) -> Snapshot {
    let mut snapshot = Snapshot::new().field("id", id);
    for field in model_type.tracked_fields() {
        let value = match *field {
            "is_active" | "maintenance_mode" => "1".to_string(),
            "sort_order" => "0".to_string(),
            "career_id" => String::new(),
            "closes_on" | "issued_on" | "expires_on" => "2025-06-30".to_string(),
            other => format!("{other} {id}"),
        };
        snapshot.set(field, value);
    }
    snapshot
}
