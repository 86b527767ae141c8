//! 运行期可调的系统设置

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "system_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
    pub value_type: String,
    pub description: Option<String>,
    pub updated_at: i64,
    pub updated_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 声明类型未知或值与类型不符时返回错误
    pub fn into_setting(self) -> Result<crate::models::system::entities::SystemSetting, String> {
        use crate::models::system::entities::{SettingValueType, SystemSetting};
        use chrono::{DateTime, Utc};

        let value_type = self.value_type.parse::<SettingValueType>()?;
        value_type
            .check(&self.value)
            .map_err(|e| format!("setting '{}': {e}", self.key))?;

        Ok(SystemSetting {
            key: self.key,
            value: self.value,
            value_type,
            description: self.description,
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
            updated_by: self.updated_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(value: &str, value_type: &str) -> Model {
        Model {
            key: "enrollment.max_credits".to_string(),
            value: value.to_string(),
            value_type: value_type.to_string(),
            description: None,
            updated_at: 0,
            updated_by: None,
        }
    }

    #[test]
    fn test_into_setting_checks_declared_type() {
        assert!(row("21", "integer").into_setting().is_ok());
        assert!(row("many", "integer").into_setting().is_err());
        assert!(row("21", "decimal_number").into_setting().is_err());
    }
}
