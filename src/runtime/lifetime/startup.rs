use crate::cache::ObjectCache;
use crate::cache::register::{FALLBACK_BACKEND, get_object_cache_plugin, registered_backends};
use crate::config::AppConfig;
use crate::models::users::entities::{UserRole, UserStatus};
use crate::models::users::requests::NewUser;
use crate::services::system::DynamicConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_backend(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let Some(constructor) = get_object_cache_plugin(name) else {
        warn!("Cache backend '{}' not found in registry", name);
        return None;
    };
    match constructor().await {
        Ok(cache) => {
            warn!("Using {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// 创建缓存实例，配置的后端不可用时回落到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();

    if let Some(cache) = build_backend(cache_type).await {
        return Ok(cache);
    }
    if cache_type != FALLBACK_BACKEND {
        warn!("Falling back to {} cache", FALLBACK_BACKEND);
        if let Some(cache) = build_backend(FALLBACK_BACKEND).await {
            return Ok(cache);
        }
    }

    Err(format!(
        "No cache backend available (configured: {cache_type}, registered: {})",
        registered_backends().join(", ")
    )
    .into())
}

/// 初始化动态配置缓存
/// 从数据库加载配置并初始化全局缓存
async fn init_dynamic_config(storage: &Arc<dyn Storage>) {
    match storage.list_all_settings().await {
        Ok(settings) => {
            let settings_vec: Vec<(String, String)> =
                settings.into_iter().map(|s| (s.key, s.value)).collect();
            DynamicConfig::init(settings_vec).await;
        }
        Err(e) => {
            warn!(
                "Failed to load dynamic config from database: {}, using defaults",
                e
            );
            // 使用空配置初始化，DynamicConfig 会回退到 AppConfig
            DynamicConfig::init(vec![]).await;
        }
    }
}

/// 初始化管理员账号
/// 数据库中没有任何用户时，以 `academic.bootstrap_admin` 创建一个已激活的管理员
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating bootstrap admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let username = AppConfig::get().academic.bootstrap_admin.trim().to_string();
    if username.is_empty() {
        warn!("academic.bootstrap_admin is empty, skipping admin seed");
        return;
    }

    let admin = NewUser {
        email: format!("{username}@localhost"),
        username,
        full_name: "Administrator".to_string(),
        phone: None,
        role: UserRole::Admin,
        status: UserStatus::Active,
        department_id: None,
    };

    match storage.create_user(admin).await {
        Ok(user) => {
            warn!("==========================================================");
            warn!("  Bootstrap admin created (ID: {}, username: {})", user.id, user.username);
            warn!("  Send 'X-User-Id: {}' to act as this account", user.id);
            warn!("==========================================================");
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和路由配置等
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化动态配置缓存
    init_dynamic_config(&storage).await;

    // 初始化管理员账号（如果需要）
    seed_admin(&storage).await;

    // 创建缓存实例
    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}
