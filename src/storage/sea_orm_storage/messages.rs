//! 站内信存储操作

use super::SeaOrmStorage;
use crate::entity::messages::{ActiveModel, Column, Entity as Messages};
use crate::errors::{LmsError, Result};
use crate::models::{PaginatedResponse, messages::entities::Message};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 发送消息
    pub async fn create_message_impl(
        &self,
        sender_id: i64,
        recipient_id: i64,
        subject: String,
        body: String,
    ) -> Result<Message> {
        let model = ActiveModel {
            sender_id: Set(sender_id),
            recipient_id: Set(recipient_id),
            subject: Set(subject),
            body: Set(body),
            sent_at: Set(chrono::Utc::now().timestamp()),
            read_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to send message: {e}")))?;
        Ok(result.into_message())
    }

    pub async fn get_message_impl(&self, id: i64) -> Result<Option<Message>> {
        let result = Messages::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_message()))
    }

    /// 收件箱
    pub async fn list_inbox_impl(
        &self,
        user_id: i64,
        unread_only: bool,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<Message>> {
        let mut select = Messages::find().filter(Column::RecipientId.eq(user_id));
        if unread_only {
            select = select.filter(Column::ReadAt.is_null());
        }
        let select = select.order_by_desc(Column::SentAt).order_by_desc(Column::Id);

        let (items, pagination) = self.fetch_page(select, page, size).await?;
        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_message()).collect(),
            pagination,
        })
    }

    /// 已发送
    pub async fn list_sent_impl(
        &self,
        user_id: i64,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<Message>> {
        let select = Messages::find()
            .filter(Column::SenderId.eq(user_id))
            .order_by_desc(Column::SentAt)
            .order_by_desc(Column::Id);

        let (items, pagination) = self.fetch_page(select, page, size).await?;
        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_message()).collect(),
            pagination,
        })
    }

    /// 标记已读，已读的消息保持原时间
    pub async fn mark_message_read_impl(&self, id: i64) -> Result<Option<Message>> {
        let Some(existing) = Messages::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        if existing.read_at.is_some() {
            return Ok(Some(existing.into_message()));
        }

        let mut model: ActiveModel = existing.into();
        model.read_at = Set(Some(chrono::Utc::now().timestamp()));
        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to mark message read: {e}")))?;
        Ok(Some(updated.into_message()))
    }

    /// 未读数量
    pub async fn count_unread_messages_impl(&self, user_id: i64) -> Result<u64> {
        let count = Messages::find()
            .filter(Column::RecipientId.eq(user_id))
            .filter(Column::ReadAt.is_null())
            .count(&self.db)
            .await?;
        Ok(count)
    }

    pub async fn delete_message_impl(&self, id: i64) -> Result<bool> {
        let result = Messages::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
