//! EAV 属性值实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attribute_values")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    pub name: String,
    pub value_type: String,
    pub value: String,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    /// 存储的类型或值无法解析时返回错误
    pub fn into_attribute(self) -> Result<crate::models::attributes::Attribute, String> {
        use crate::models::attributes::{Attribute, AttributeType, AttributeValue, EntityType};
        use chrono::{DateTime, Utc};

        let entity_type = self.entity_type.parse::<EntityType>()?;
        let value_type = self.value_type.parse::<AttributeType>()?;
        Ok(Attribute {
            entity_type,
            entity_id: self.entity_id,
            value: AttributeValue::decode(value_type, &self.value)?,
            name: self.name,
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}
