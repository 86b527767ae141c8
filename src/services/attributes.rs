//! EAV 属性读写
//!
//! 写入前按实体类型校验，读取整张属性表时经过对象缓存，任何写入都会使该实体的缓存失效。

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::HttpRequest;
use serde_json::Value;

use crate::cache::{self, CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::errors::{LmsError, Result};
use crate::models::attributes::{
    Attribute, AttributeMap, AttributeRecord, AttributeSchema, AttributeValue, EntityType,
};
use crate::storage::Storage;

pub struct AttributeStore {
    storage: Arc<dyn Storage>,
    cache: Option<Arc<dyn ObjectCache>>,
}

impl AttributeStore {
    pub fn new(storage: Arc<dyn Storage>, cache: Option<Arc<dyn ObjectCache>>) -> Self {
        Self { storage, cache }
    }

    pub fn from_request(storage: Arc<dyn Storage>, request: &HttpRequest) -> Self {
        Self::new(storage, super::request_cache(request))
    }

    /// 单个实体的全部属性
    pub async fn map(&self, entity_type: EntityType, entity_id: i64) -> Result<AttributeMap> {
        let key = cache::attribute_key(entity_type.as_str(), entity_id);

        if let Some(cache) = &self.cache
            && let CacheResult::Found(records) = cache.get::<Vec<AttributeRecord>>(&key).await
        {
            let decoded: std::result::Result<AttributeMap, String> = records
                .iter()
                .map(|r| r.typed_value().map(|v| (r.name.clone(), v)))
                .collect();
            match decoded {
                Ok(map) => return Ok(map),
                Err(e) => {
                    tracing::warn!("Discarding cached attributes '{}': {}", key, e);
                    cache.remove(&key).await;
                }
            }
        }

        let attributes = self.storage.list_attributes(entity_type, entity_id).await?;
        if let Some(cache) = &self.cache {
            let records: Vec<AttributeRecord> =
                attributes.iter().map(AttributeRecord::from).collect();
            cache
                .insert(key, &records, AppConfig::get().cache.default_ttl)
                .await;
        }

        Ok(attributes
            .into_iter()
            .map(|attr| (attr.name, attr.value))
            .collect())
    }

    /// 批量读取，直接走存储
    pub async fn maps_for(
        &self,
        entity_type: EntityType,
        entity_ids: &[i64],
    ) -> Result<HashMap<i64, AttributeMap>> {
        let grouped = self
            .storage
            .list_attributes_for(entity_type, entity_ids)
            .await?;
        Ok(grouped
            .into_iter()
            .map(|(id, attrs)| {
                let map = attrs.into_iter().map(|a| (a.name, a.value)).collect();
                (id, map)
            })
            .collect())
    }

    pub async fn set(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
        value: AttributeValue,
    ) -> Result<Attribute> {
        let value = AttributeSchema::check(entity_type, name, value).map_err(LmsError::validation)?;
        let saved = self
            .storage
            .set_attribute(entity_type, entity_id, name, value)
            .await?;
        self.invalidate(entity_type, entity_id).await;
        Ok(saved)
    }

    /// 按 JSON 推断类型后写入
    pub async fn set_json(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
        value: &Value,
    ) -> Result<Attribute> {
        let value = AttributeValue::infer(value)
            .map_err(|e| LmsError::validation(format!("Attribute '{name}': {e}")))?;
        self.set(entity_type, entity_id, name, value).await
    }

    pub async fn delete(&self, entity_type: EntityType, entity_id: i64, name: &str) -> Result<bool> {
        let removed = self
            .storage
            .delete_attribute(entity_type, entity_id, name)
            .await?;
        if removed {
            self.invalidate(entity_type, entity_id).await;
        }
        Ok(removed)
    }

    pub async fn delete_all(&self, entity_type: EntityType, entity_id: i64) -> Result<u64> {
        let removed = self
            .storage
            .delete_all_attributes(entity_type, entity_id)
            .await?;
        self.invalidate(entity_type, entity_id).await;
        Ok(removed)
    }

    /// 原子替换某个前缀下的全部属性
    pub async fn replace_prefix(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        prefix: &str,
        values: Vec<(String, AttributeValue)>,
    ) -> Result<Vec<Attribute>> {
        let mut checked = Vec::with_capacity(values.len());
        for (name, value) in values {
            if !name.starts_with(prefix) {
                return Err(LmsError::validation(format!(
                    "Attribute '{name}' is outside prefix '{prefix}'"
                )));
            }
            let value =
                AttributeSchema::check(entity_type, &name, value).map_err(LmsError::validation)?;
            checked.push((name, value));
        }

        let saved = self
            .storage
            .replace_attributes_with_prefix(entity_type, entity_id, prefix, checked)
            .await?;
        self.invalidate(entity_type, entity_id).await;
        Ok(saved)
    }

    /// 存储层在其他事务中改动了属性时，由调用方丢弃缓存
    pub async fn invalidate(&self, entity_type: EntityType, entity_id: i64) {
        if let Some(cache) = &self.cache {
            cache
                .remove(&cache::attribute_key(entity_type.as_str(), entity_id))
                .await;
        }
    }
}
