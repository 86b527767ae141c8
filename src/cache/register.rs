//! 缓存后端注册表
//!
//! 各后端在加载时以名字登记构造函数，启动时按 `cache.type` 取用。

use crate::cache::traits::ObjectCache;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::BTreeMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

/// 内存后端的名字，其它后端不可用时回落到它
pub const FALLBACK_BACKEND: &str = "moka";

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<BTreeMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(BTreeMap::new()));

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    let name = name.into();
    let mut registry = OBJECT_CACHE_REGISTRY
        .write()
        .expect("Cache registry lock poisoned");
    if registry.insert(name.clone(), constructor).is_some() {
        tracing::warn!("Cache backend '{}' registered twice, keeping the latest", name);
    }
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    OBJECT_CACHE_REGISTRY
        .read()
        .expect("Cache registry lock poisoned")
        .get(name)
        .cloned()
}

/// 已注册的后端名，按字母序
pub fn registered_backends() -> Vec<String> {
    OBJECT_CACHE_REGISTRY
        .read()
        .expect("Cache registry lock poisoned")
        .keys()
        .cloned()
        .collect()
}

pub fn debug_object_cache_registry() {
    let backends = registered_backends();
    if backends.is_empty() {
        tracing::debug!("No cache backends registered");
    } else {
        tracing::debug!("Registered cache backends: {}", backends.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_backends_are_registered() {
        let backends = registered_backends();
        assert!(backends.iter().any(|b| b == FALLBACK_BACKEND));
        assert!(backends.iter().any(|b| b == "redis"));
        assert!(get_object_cache_plugin("memcached").is_none());
    }
}
