//! Selection of the cache backend that holds undo slots.

use std::sync::Arc;

use tracing::info;

use manara_core::config::cache::{CacheBackend, CacheConfig};
use manara_core::result::AppResult;
use manara_core::traits::cache::CacheProvider;

/// Backend name and reachability, as reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    pub backend: &'static str,
    pub healthy: bool,
}

/// Owns the configured cache backend.
///
/// Undo slots are session-scoped and short-lived, so the in-memory
/// backend is enough for a single admin node; Redis is required once
/// several nodes share admin sessions.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
}

impl CacheManager {
    /// Build the backend named by `config.provider`.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner = build_provider(config).await?;
        info!(
            backend = inner.backend(),
            default_ttl_seconds = config.default_ttl_seconds,
            "Cache ready"
        );
        Ok(Self { inner })
    }

    /// Wrap an already constructed backend.
    pub fn from_provider(provider: Arc<dyn CacheProvider>) -> Self {
        Self { inner: provider }
    }

    /// Shared handle to the backend.
    pub fn provider(&self) -> Arc<dyn CacheProvider> {
        Arc::clone(&self.inner)
    }

    /// Probe the backend. A failing probe reports `healthy: false`.
    pub async fn status(&self) -> CacheStatus {
        let healthy = match self.inner.health_check().await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(error = %e, "Cache health check failed");
                false
            }
        };
        CacheStatus {
            backend: self.inner.backend(),
            healthy,
        }
    }
}

async fn build_provider(config: &CacheConfig) -> AppResult<Arc<dyn CacheProvider>> {
    #[allow(unreachable_patterns)]
    match config.provider {
        #[cfg(feature = "redis-backend")]
        CacheBackend::Redis => {
            let client = crate::redis::RedisClient::connect(&config.redis).await?;
            Ok(Arc::new(crate::redis::RedisCacheProvider::new(
                client,
                config.default_ttl_seconds,
            )))
        }
        #[cfg(feature = "memory")]
        CacheBackend::Memory => Ok(Arc::new(crate::memory::MemoryCacheProvider::new(
            &config.memory,
            config.default_ttl_seconds,
        ))),
        other => Err(manara_core::error::AppError::configuration(format!(
            "Cache backend '{other}' is not compiled into this build"
        ))),
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use manara_core::config::cache::CacheConfig;

    #[tokio::test]
    async fn test_memory_provider_selected_by_default() {
        let manager = CacheManager::new(&CacheConfig::default()).await.unwrap();
        let status = manager.status().await;
        assert_eq!(status.backend, "memory");
        assert!(status.healthy);

        let provider = manager.provider();
        provider.set_default("k", "v").await.unwrap();
        assert_eq!(provider.get("k").await.unwrap(), Some("v".to_string()));
    }
}
