//! Session-scoped undo slots held in the cache.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use manara_cache::keys;
use manara_core::result::AppResult;
use manara_core::traits::CacheProvider;
use manara_core::types::ModelType;
use manara_entity::change_log::ChangeAction;

/// Summary rendered next to the one-click Undo button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoMeta {
    pub model_type: ModelType,
    pub model_id: Option<i64>,
    /// Change-log entry backing this slot.
    pub log_id: Option<Uuid>,
    pub action: ChangeAction,
    /// Number of fields changed (updates) or captured (deletes).
    pub field_count: usize,
    /// Short human-readable description, e.g. `Changed Name (EN), Slug`.
    pub summary: String,
    pub captured_at: DateTime<Utc>,
}

/// The value stored under an undo slot key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoSlot {
    /// The record the slot points at; `None` for singletons.
    pub model_id: Option<i64>,
    pub meta: UndoMeta,
}

/// Reads and writes one undo slot per (session, model type).
///
/// Writes overwrite: only the most recent change of each type is
/// reachable through a slot.
#[derive(Debug, Clone)]
pub struct SlotStore {
    cache: Arc<dyn CacheProvider>,
    ttl: Duration,
}

impl SlotStore {
    /// Create a slot store with the given slot lifetime.
    pub fn new(cache: Arc<dyn CacheProvider>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Overwrite the slot for `model_type`.
    pub async fn put(&self, session_id: Uuid, meta: UndoMeta) -> AppResult<()> {
        let key = keys::undo_slot(session_id, meta.model_type);
        let slot = UndoSlot {
            model_id: meta.model_id,
            meta,
        };
        let json = serde_json::to_string(&slot)?;
        self.cache.set(&key, &json, self.ttl).await?;
        debug!(%session_id, model_type = %slot.meta.model_type, model_id = ?slot.model_id, "Undo slot written");
        Ok(())
    }

    /// Read the slot for `model_type`.
    ///
    /// An unreadable slot value is dropped and reported as empty.
    pub async fn get(&self, session_id: Uuid, model_type: ModelType) -> AppResult<Option<UndoSlot>> {
        let key = keys::undo_slot(session_id, model_type);
        let Some(raw) = self.cache.get(&key).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<UndoSlot>(&raw) {
            Ok(slot) => Ok(Some(slot)),
            Err(e) => {
                warn!(%session_id, %model_type, error = %e, "Discarding unreadable undo slot");
                self.cache.delete(&key).await?;
                Ok(None)
            }
        }
    }

    /// Drop the slot for `model_type`.
    pub async fn clear(&self, session_id: Uuid, model_type: ModelType) -> AppResult<()> {
        self.cache
            .delete(&keys::undo_slot(session_id, model_type))
            .await
    }

    /// Drop every slot of a session. Returns the number removed.
    pub async fn clear_all(&self, session_id: Uuid) -> AppResult<u64> {
        self.cache
            .delete_pattern(&keys::undo_session_pattern(session_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manara_cache::memory::MemoryCacheProvider;
    use manara_core::config::cache::MemoryCacheConfig;

    fn store() -> (SlotStore, Arc<dyn CacheProvider>) {
        let cache: Arc<dyn CacheProvider> =
            Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig::default(), 60));
        (SlotStore::new(cache.clone(), Duration::from_secs(60)), cache)
    }

    fn meta(model_type: ModelType, model_id: Option<i64>) -> UndoMeta {
        UndoMeta {
            model_type,
            model_id,
            log_id: Some(Uuid::new_v4()),
            action: ChangeAction::Update,
            field_count: 1,
            summary: "Changed Slug".to_string(),
            captured_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_put_overwrites_per_model_type() {
        let (slots, _) = store();
        let session = Uuid::new_v4();

        slots.put(session, meta(ModelType::Product, Some(1))).await.unwrap();
        slots.put(session, meta(ModelType::Product, Some(2))).await.unwrap();
        slots.put(session, meta(ModelType::Career, Some(9))).await.unwrap();

        let product = slots.get(session, ModelType::Product).await.unwrap().unwrap();
        assert_eq!(product.model_id, Some(2));
        let career = slots.get(session, ModelType::Career).await.unwrap().unwrap();
        assert_eq!(career.model_id, Some(9));
        assert!(slots.get(Uuid::new_v4(), ModelType::Product).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_and_clear_all() {
        let (slots, _) = store();
        let session = Uuid::new_v4();
        let other = Uuid::new_v4();
        for t in [ModelType::Product, ModelType::Media, ModelType::Certificate] {
            slots.put(session, meta(t, Some(3))).await.unwrap();
        }
        slots.put(other, meta(ModelType::Product, Some(3))).await.unwrap();

        slots.clear(session, ModelType::Media).await.unwrap();
        assert!(slots.get(session, ModelType::Media).await.unwrap().is_none());

        assert_eq!(slots.clear_all(session).await.unwrap(), 2);
        assert!(slots.get(session, ModelType::Product).await.unwrap().is_none());
        assert!(slots.get(other, ModelType::Product).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unreadable_slot_is_discarded() {
        let (slots, cache) = store();
        let session = Uuid::new_v4();
        let key = keys::undo_slot(session, ModelType::Product);
        cache.set_default(&key, "not json").await.unwrap();

        assert!(slots.get(session, ModelType::Product).await.unwrap().is_none());
        assert!(!cache.exists(&key).await.unwrap());
    }
}
