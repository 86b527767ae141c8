//! 缓存层
//!
//! 插件通过 `declare_object_cache_plugin!` 在加载时注册，启动时按 `cache.type` 选择。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 用户缓存键
pub fn user_key(user_id: i64) -> String {
    format!("user:{user_id}")
}

/// EAV 属性缓存键
pub fn attribute_key(entity_type: &str, entity_id: i64) -> String {
    format!("attrs:{entity_type}:{entity_id}")
}
