//! Job application entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use manara_core::AppResult;
use manara_core::types::{ModelType, Snapshot};

use super::{FromSnapshot, Trackable, snapshot_with_id};

/// An application submitted against a job listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    /// Primary key.
    pub id: i64,
    /// The listing applied to; cleared when that listing is deleted.
    pub career_id: Option<i64>,
    /// Applicant full name.
    pub applicant_name: String,
    /// Applicant email.
    pub email: String,
    /// Applicant phone.
    pub phone: Option<String>,
    /// Review status (e.g. `new`, `shortlisted`, `rejected`).
    pub status: String,
    /// Reviewer notes.
    pub notes: Option<String>,
    /// When the application was received.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Trackable for JobApplication {
    const MODEL_TYPE: ModelType = ModelType::Application;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn snapshot(&self) -> Snapshot {
        snapshot_with_id(self.id)
            .field("career_id", self.career_id)
            .field("applicant_name", &self.applicant_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("status", &self.status)
            .field("notes", &self.notes)
    }
}

/// Trackable columns of a job application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplicationFields {
    pub career_id: Option<i64>,
    pub applicant_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

impl FromSnapshot for JobApplicationFields {
    fn from_snapshot(s: &Snapshot) -> AppResult<Self> {
        Ok(Self {
            career_id: s.opt_int("career_id")?,
            applicant_name: s.text("applicant_name")?,
            email: s.text("email")?,
            phone: s.opt_text("phone"),
            status: s.text("status")?,
            notes: s.opt_text("notes"),
        })
    }
}
