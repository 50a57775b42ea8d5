//! Undo and change-log configuration.

use serde::{Deserialize, Serialize};

/// Undo slot and change-log behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoConfig {
    /// Lifetime of a session undo slot in minutes.
    #[serde(default = "default_slot_ttl")]
    pub slot_ttl_minutes: u64,
    /// When `true`, a failed change-log write aborts the admin mutation.
    /// When `false`, the mutation proceeds and undo is unavailable for it.
    #[serde(default)]
    pub strict_logging: bool,
    /// Page size used by the change-log listing when none is requested.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Entries older than this many days are removed by `change-log purge`.
    /// `0` disables the retention purge.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            slot_ttl_minutes: default_slot_ttl(),
            strict_logging: false,
            default_page_size: default_page_size(),
            retention_days: default_retention_days(),
        }
    }
}

fn default_slot_ttl() -> u64 {
    120
}

fn default_page_size() -> u64 {
    25
}

fn default_retention_days() -> u32 {
    365
}
