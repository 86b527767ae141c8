//! 系统设置存储实现

use sea_orm::{ActiveModelTrait, EntityTrait, Order, QueryOrder, Set};

use crate::entity::prelude::SystemSettings;
use crate::errors::{LmsError, Result};
use crate::models::system::entities::SystemSetting;

use super::SeaOrmStorage;

fn decode(model: crate::entity::system_settings::Model) -> Result<SystemSetting> {
    model.into_setting().map_err(LmsError::serialization)
}

impl SeaOrmStorage {
    /// 获取所有设置
    pub(crate) async fn list_all_settings_impl(&self) -> Result<Vec<SystemSetting>> {
        let settings = SystemSettings::find()
            .order_by(crate::entity::system_settings::Column::Key, Order::Asc)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list settings: {e}")))?;

        settings.into_iter().map(decode).collect()
    }

    /// 通过 key 获取设置
    pub(crate) async fn get_setting_by_key_impl(&self, key: &str) -> Result<Option<SystemSetting>> {
        let setting = SystemSettings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to load setting: {e}")))?;

        setting.map(decode).transpose()
    }

    /// 更新设置
    pub(crate) async fn update_setting_impl(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
    ) -> Result<SystemSetting> {
        let existing = SystemSettings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to load setting: {e}")))?
            .ok_or_else(|| LmsError::not_found(format!("Setting not found: {key}")))?;

        let mut active_model: crate::entity::system_settings::ActiveModel = existing.into();
        active_model.value = Set(value.to_string());
        active_model.updated_at = Set(chrono::Utc::now().timestamp());
        active_model.updated_by = Set(Some(user_id));

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to update setting: {e}")))?;

        decode(updated)
    }
}
