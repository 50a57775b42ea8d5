//! Kind of mutation recorded by a change-log entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The admin action that produced a change-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "change_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    /// Fields of an existing record were modified.
    Update,
    /// The record was deleted; `new_data` is absent.
    Delete,
}

impl ChangeAction {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChangeAction {
    type Err = manara_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(manara_core::AppError::validation(format!(
                "Invalid change action: '{s}'. Expected one of: update, delete"
            ))),
        }
    }
}
