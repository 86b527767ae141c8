//! 公告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
    pub published_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    /// 可见范围保存在 EAV 属性中，由调用方补全
    pub fn into_announcement(
        self,
        scope: crate::models::announcements::AnnouncementScope,
    ) -> crate::models::announcements::Announcement {
        use crate::models::announcements::Announcement;
        use chrono::{DateTime, Utc};

        Announcement {
            id: self.id,
            author_id: self.author_id,
            title: self.title,
            body: self.body,
            published_at: DateTime::<Utc>::from_timestamp(self.published_at, 0).unwrap_or_default(),
            scope,
        }
    }
}
