use super::SeaOrmStorage;
use crate::entity::announcements::{ActiveModel, Column, Entity as Announcements};
use crate::errors::{LmsError, Result};
use crate::models::announcements::{Announcement, AnnouncementScope};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建公告，范围属性由调用方另行写入
    pub async fn create_announcement_impl(
        &self,
        author_id: i64,
        title: String,
        body: String,
    ) -> Result<Announcement> {
        let model = ActiveModel {
            author_id: Set(author_id),
            title: Set(title),
            body: Set(body),
            published_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to publish announcement: {e}"))
        })?;
        Ok(result.into_announcement(AnnouncementScope::default()))
    }

    pub async fn get_announcement_impl(&self, id: i64) -> Result<Option<Announcement>> {
        let result = Announcements::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_announcement(AnnouncementScope::default())))
    }

    pub async fn list_announcements_impl(&self) -> Result<Vec<Announcement>> {
        let result = Announcements::find()
            .order_by_desc(Column::PublishedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(result
            .into_iter()
            .map(|m| m.into_announcement(AnnouncementScope::default()))
            .collect())
    }

    pub async fn delete_announcement_impl(&self, id: i64) -> Result<bool> {
        let result = Announcements::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
