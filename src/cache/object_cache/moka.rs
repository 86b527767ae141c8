use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaObjectCache);

/// 进程内缓存，默认插件，也是 Redis 不可用时的回退
pub struct MokaObjectCache {
    inner: Cache<String, String>,
}

impl MokaObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_settings(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    pub fn with_settings(max_capacity: u64, ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(std::time::Duration::from_secs(ttl_secs))
            .build();

        debug!(
            "MokaObjectCache initialized with max capacity: {}, TTL: {}s",
            max_capacity, ttl_secs
        );
        Self { inner }
    }
}

#[async_trait]
impl ObjectCache for MokaObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(value) => CacheResult::Found(value),
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, _ttl: u64) {
        // 单条 TTL 不生效，统一使用构建时的全局 TTL
        self.inner.insert(key, value).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache: Box<dyn ObjectCache> = Box::new(MokaObjectCache::with_settings(100, 60));
        cache.insert("user:1".to_string(), &vec![1_i64, 2, 3], 0).await;

        let hit: CacheResult<Vec<i64>> = cache.get("user:1").await;
        assert_eq!(hit, CacheResult::Found(vec![1, 2, 3]));

        cache.remove("user:1").await;
        let miss: CacheResult<Vec<i64>> = cache.get("user:1").await;
        assert_eq!(miss, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_not_a_hit() {
        let cache: Box<dyn ObjectCache> = Box::new(MokaObjectCache::with_settings(100, 60));
        cache.insert_raw("k".to_string(), "not json".to_string(), 0).await;
        let result: CacheResult<i64> = cache.get("k").await;
        assert_eq!(result, CacheResult::ExistsButNoValue);
    }
}
