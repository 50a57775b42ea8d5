//! Cache keys for session undo slots.
//!
//! One slot per (session, entity kind): a newer capture for the same kind
//! overwrites the older one. The Redis backend adds its configured
//! namespace (`cache.redis.key_prefix`) in front of these keys.

use uuid::Uuid;

use manara_core::types::ModelType;

/// Cache key for the undo slot of one entity kind within a session.
pub fn undo_slot(session_id: Uuid, model_type: ModelType) -> String {
    format!("undo:{session_id}:{}", model_type.as_str())
}

/// Pattern matching every undo slot of a session.
pub fn undo_session_pattern(session_id: Uuid) -> String {
    format!("undo:{session_id}:*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_slot_key() {
        let sid = Uuid::nil();
        assert_eq!(
            undo_slot(sid, ModelType::SiteContent),
            "undo:00000000-0000-0000-0000-000000000000:site_content"
        );
    }

    #[test]
    fn test_session_pattern_covers_every_slot() {
        let sid = Uuid::new_v4();
        let prefix = undo_session_pattern(sid);
        let prefix = prefix.trim_end_matches('*');
        for t in ModelType::ALL {
            assert!(undo_slot(sid, t).starts_with(prefix));
        }
        assert!(!undo_slot(Uuid::new_v4(), ModelType::Product).starts_with(prefix));
    }
}
