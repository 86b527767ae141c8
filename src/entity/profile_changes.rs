//! 资料修改申请实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profile_changes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: String,
    pub status: String,
    pub requested_at: i64,
    pub reviewed_at: Option<i64>,
    pub reviewed_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_profile_change(self) -> crate::models::profile::entities::ProfileChange {
        use crate::models::profile::entities::{ProfileChange, ProfileChangeStatus, ProfileField};
        use chrono::{DateTime, Utc};

        ProfileChange {
            id: self.id,
            user_id: self.user_id,
            field: self.field.parse::<ProfileField>().unwrap_or(ProfileField::FullName),
            old_value: self.old_value,
            new_value: self.new_value,
            status: self
                .status
                .parse::<ProfileChangeStatus>()
                .unwrap_or(ProfileChangeStatus::Pending),
            requested_at: DateTime::<Utc>::from_timestamp(self.requested_at, 0).unwrap_or_default(),
            reviewed_at: self
                .reviewed_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            reviewed_by: self.reviewed_by,
        }
    }
}
