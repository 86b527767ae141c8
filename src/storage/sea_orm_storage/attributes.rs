//! EAV 属性存储
//!
//! 每行保存 `(entity_type, entity_id, name)` 唯一键下的一个类型化值，
//! 值以文本编码，读取时按 `value_type` 解码。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::attribute_values::{ActiveModel, Column, Entity as AttributeValues, Model};
use crate::errors::{LmsError, Result};
use crate::models::attributes::{Attribute, AttributeValue, EntityType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

fn decode(model: Model) -> Result<Attribute> {
    let key = format!("{}#{}.{}", model.entity_type, model.entity_id, model.name);
    model
        .into_attribute()
        .map_err(|e| LmsError::serialization(format!("Corrupt attribute {key}: {e}")))
}

impl SeaOrmStorage {
    async fn find_attribute_row<C: ConnectionTrait>(
        conn: &C,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
    ) -> Result<Option<Model>> {
        let row = AttributeValues::find()
            .filter(Column::EntityType.eq(entity_type.as_str()))
            .filter(Column::EntityId.eq(entity_id))
            .filter(Column::Name.eq(name))
            .one(conn)
            .await?;
        Ok(row)
    }

    pub(super) async fn upsert_attribute_row<C: ConnectionTrait>(
        conn: &C,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
        value: &AttributeValue,
    ) -> Result<Model> {
        let now = chrono::Utc::now().timestamp();
        let saved = match Self::find_attribute_row(conn, entity_type, entity_id, name).await? {
            Some(existing) => {
                let mut model: ActiveModel = existing.into();
                model.value_type = Set(value.value_type().to_string());
                model.value = Set(value.encode());
                model.updated_at = Set(now);
                model.update(conn).await?
            }
            None => {
                ActiveModel {
                    entity_type: Set(entity_type.to_string()),
                    entity_id: Set(entity_id),
                    name: Set(name.to_string()),
                    value_type: Set(value.value_type().to_string()),
                    value: Set(value.encode()),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(conn)
                .await?
            }
        };
        Ok(saved)
    }

    /// 父实体删除时清理其属性
    pub(super) async fn delete_attributes_of<C: ConnectionTrait>(
        conn: &C,
        entity_type: EntityType,
        entity_ids: &[i64],
    ) -> Result<u64> {
        if entity_ids.is_empty() {
            return Ok(0);
        }
        let result = AttributeValues::delete_many()
            .filter(Column::EntityType.eq(entity_type.as_str()))
            .filter(Column::EntityId.is_in(entity_ids.iter().copied()))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete_prefixed<C: ConnectionTrait>(
        conn: &C,
        entity_type: EntityType,
        entity_id: i64,
        prefix: &str,
    ) -> Result<u64> {
        let ids: Vec<i64> = AttributeValues::find()
            .filter(Column::EntityType.eq(entity_type.as_str()))
            .filter(Column::EntityId.eq(entity_id))
            .all(conn)
            .await?
            .into_iter()
            .filter(|row| row.name.starts_with(prefix))
            .map(|row| row.id)
            .collect();

        if ids.is_empty() {
            return Ok(0);
        }

        let result = AttributeValues::delete_many()
            .filter(Column::Id.is_in(ids))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// 写入或覆盖属性
    pub async fn set_attribute_impl(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
        value: AttributeValue,
    ) -> Result<Attribute> {
        let saved = Self::upsert_attribute_row(&self.db, entity_type, entity_id, name, &value)
            .await
            .map_err(|e| {
                LmsError::database_operation(format!("Failed to set attribute '{name}': {e}"))
            })?;
        decode(saved)
    }

    pub async fn get_attribute_impl(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
    ) -> Result<Option<Attribute>> {
        Self::find_attribute_row(&self.db, entity_type, entity_id, name)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn list_attributes_impl(
        &self,
        entity_type: EntityType,
        entity_id: i64,
    ) -> Result<Vec<Attribute>> {
        let rows = AttributeValues::find()
            .filter(Column::EntityType.eq(entity_type.as_str()))
            .filter(Column::EntityId.eq(entity_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;
        rows.into_iter().map(decode).collect()
    }

    /// 一次查询多个实体的属性
    pub async fn list_attributes_for_impl(
        &self,
        entity_type: EntityType,
        entity_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Attribute>>> {
        let mut grouped: HashMap<i64, Vec<Attribute>> = HashMap::new();
        if entity_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = AttributeValues::find()
            .filter(Column::EntityType.eq(entity_type.as_str()))
            .filter(Column::EntityId.is_in(entity_ids.iter().copied()))
            .order_by_asc(Column::EntityId)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;

        for row in rows {
            let attribute = decode(row)?;
            grouped.entry(attribute.entity_id).or_default().push(attribute);
        }
        Ok(grouped)
    }

    pub async fn delete_attribute_impl(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
    ) -> Result<bool> {
        let result = AttributeValues::delete_many()
            .filter(Column::EntityType.eq(entity_type.as_str()))
            .filter(Column::EntityId.eq(entity_id))
            .filter(Column::Name.eq(name))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_attributes_by_prefix_impl(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        prefix: &str,
    ) -> Result<u64> {
        Self::delete_prefixed(&self.db, entity_type, entity_id, prefix).await
    }

    pub async fn delete_all_attributes_impl(
        &self,
        entity_type: EntityType,
        entity_id: i64,
    ) -> Result<u64> {
        Self::delete_attributes_of(&self.db, entity_type, &[entity_id]).await
    }

    /// 删除前缀下的旧属性并写入新集合
    pub async fn replace_attributes_with_prefix_impl(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        prefix: &str,
        values: Vec<(String, AttributeValue)>,
    ) -> Result<Vec<Attribute>> {
        let txn = self.db.begin().await?;

        Self::delete_prefixed(&txn, entity_type, entity_id, prefix).await?;

        let mut saved = Vec::with_capacity(values.len());
        for (name, value) in values {
            let row =
                Self::upsert_attribute_row(&txn, entity_type, entity_id, &name, &value).await?;
            saved.push(decode(row)?);
        }

        txn.commit().await?;
        Ok(saved)
    }
}
