//! 动态配置缓存
//!
//! 启动时从 `system_settings` 表加载，管理员修改后热更新。
//! 未加载或值无法解析时回落到配置文件中的默认值。

use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::models::system::entities::KnownSettingKey;

static DYNAMIC_CONFIG: OnceLock<RwLock<DynamicConfigCache>> = OnceLock::new();

#[derive(Debug, Default)]
struct DynamicConfigCache {
    settings: HashMap<String, String>,
    initialized: bool,
}

fn cache() -> &'static RwLock<DynamicConfigCache> {
    DYNAMIC_CONFIG.get_or_init(|| RwLock::new(DynamicConfigCache::default()))
}

/// 动态配置访问接口
pub struct DynamicConfig;

impl DynamicConfig {
    /// 用数据库中的全部配置替换缓存内容
    pub async fn init(settings: Vec<(String, String)>) {
        let mut guard = cache().write().await;
        guard.settings.clear();
        guard.settings.extend(settings);
        guard.initialized = true;

        tracing::info!(
            "Dynamic config initialized with {} settings",
            guard.settings.len()
        );
    }

    /// 更新单个配置项
    pub async fn update(key: &str, value: &str) {
        let mut guard = cache().write().await;
        guard.settings.insert(key.to_string(), value.to_string());
        tracing::debug!("Dynamic config updated: {} = {}", key, value);
    }

    async fn get_string(key: KnownSettingKey) -> Option<String> {
        let guard = DYNAMIC_CONFIG.get()?.read().await;
        guard.settings.get(key.as_str()).cloned()
    }

    async fn get_i64(key: KnownSettingKey) -> Option<i64> {
        Self::get_string(key).await.and_then(|v| v.parse().ok())
    }

    async fn get_bool(key: KnownSettingKey) -> Option<bool> {
        Self::get_string(key).await.and_then(|v| v.parse().ok())
    }

    async fn get_json_array(key: KnownSettingKey) -> Option<Vec<String>> {
        Self::get_string(key)
            .await
            .and_then(|v| serde_json::from_str(&v).ok())
    }

    /// 选课是否开放
    pub async fn enrollment_open() -> bool {
        Self::get_bool(KnownSettingKey::EnrollmentOpen)
            .await
            .unwrap_or_else(|| AppConfig::get().academic.registration_open)
    }

    /// 每学期学分上限
    pub async fn max_credits() -> i64 {
        Self::get_i64(KnownSettingKey::EnrollmentMaxCredits)
            .await
            .unwrap_or_else(|| AppConfig::get().academic.max_credits_per_semester)
    }

    /// 单次预约最长小时数
    pub async fn reservation_max_hours() -> i64 {
        Self::get_i64(KnownSettingKey::ReservationMaxHours)
            .await
            .unwrap_or_else(|| AppConfig::get().academic.max_reservation_hours)
    }

    /// 上传文件大小限制（字节）
    pub async fn upload_max_size() -> usize {
        Self::get_i64(KnownSettingKey::UploadMaxSize)
            .await
            .map(|v| v as usize)
            .unwrap_or_else(|| AppConfig::get().upload.max_size)
    }

    /// 允许上传的扩展名
    pub async fn upload_allowed_types() -> Vec<String> {
        Self::get_json_array(KnownSettingKey::UploadAllowedTypes)
            .await
            .unwrap_or_else(|| AppConfig::get().upload.allowed_types.clone())
    }

    pub async fn is_initialized() -> bool {
        match DYNAMIC_CONFIG.get() {
            Some(cache) => cache.read().await.initialized,
            None => false,
        }
    }
}
