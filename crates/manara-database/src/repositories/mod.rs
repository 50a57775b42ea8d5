//! Repository implementations for the change log and tracked records.

pub mod application;
pub mod career;
pub mod certificate;
pub mod change_log;
pub mod media;
pub mod product;
pub mod settings;
pub mod site_content;

pub use application::JobApplicationRepository;
pub use career::CareerRepository;
pub use certificate::CertificateRepository;
pub use change_log::ChangeLogRepository;
pub use media::MediaRepository;
pub use product::ProductRepository;
pub use settings::SettingsRepository;
pub use site_content::SiteContentRepository;

use std::sync::Arc;

use sqlx::PgPool;

use manara_core::error::AppError;
use manara_core::result::AppResult;
use manara_core::traits::SnapshotRepository;
use manara_core::types::{ModelType, Snapshot};

/// Factory for the per-type [`SnapshotRepository`] implementations.
#[derive(Debug, Clone)]
pub struct SnapshotRepositories {
    pool: PgPool,
}

impl SnapshotRepositories {
    /// Create the factory over a shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The repository serving `model_type`.
    pub fn for_type(&self, model_type: ModelType) -> Arc<dyn SnapshotRepository> {
        let pool = self.pool.clone();
        match model_type {
            ModelType::Product => Arc::new(ProductRepository::new(pool)),
            ModelType::Career => Arc::new(CareerRepository::new(pool)),
            ModelType::Application => Arc::new(JobApplicationRepository::new(pool)),
            ModelType::Certificate => Arc::new(CertificateRepository::new(pool)),
            ModelType::Settings => Arc::new(SettingsRepository::new(pool)),
            ModelType::SiteContent => Arc::new(SiteContentRepository::new(pool)),
            ModelType::Media => Arc::new(MediaRepository::new(pool)),
        }
    }
}

/// Extract the record id a snapshot must carry to be written back.
pub(crate) fn snapshot_id(snapshot: &Snapshot, model_type: ModelType) -> AppResult<i64> {
    snapshot.id().ok_or_else(|| {
        AppError::validation(format!("{model_type} snapshot has no valid 'id' field"))
    })
}

/// Require an id for a non-singleton lookup.
pub(crate) fn require_id(id: Option<i64>, model_type: ModelType) -> AppResult<i64> {
    id.ok_or_else(|| AppError::validation(format!("{model_type} requires a record id")))
}
