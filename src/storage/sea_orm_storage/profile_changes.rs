use super::SeaOrmStorage;
use crate::entity::profile_changes::{ActiveModel, Column, Entity as ProfileChanges};
use crate::entity::users::{ActiveModel as UserActiveModel, Entity as Users};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginatedResponse,
    profile::entities::{ProfileChange, ProfileChangeStatus, ProfileField},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 提交资料修改申请
    pub async fn create_profile_change_impl(
        &self,
        user_id: i64,
        field: ProfileField,
        old_value: Option<String>,
        new_value: String,
    ) -> Result<ProfileChange> {
        let model = ActiveModel {
            user_id: Set(user_id),
            field: Set(field.as_str().to_string()),
            old_value: Set(old_value),
            new_value: Set(new_value),
            status: Set(ProfileChangeStatus::Pending.to_string()),
            requested_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to create profile change: {e}"))
        })?;

        Ok(result.into_profile_change())
    }

    pub async fn get_profile_change_impl(&self, id: i64) -> Result<Option<ProfileChange>> {
        let result = ProfileChanges::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_profile_change()))
    }

    pub async fn has_pending_profile_change_impl(
        &self,
        user_id: i64,
        field: ProfileField,
    ) -> Result<bool> {
        let count = ProfileChanges::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Field.eq(field.as_str()))
            .filter(Column::Status.eq(ProfileChangeStatus::Pending.to_string()))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn list_profile_changes_impl(
        &self,
        user_id: Option<i64>,
        status: Option<ProfileChangeStatus>,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<ProfileChange>> {
        let mut select = ProfileChanges::find();
        if let Some(user_id) = user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        let select = select
            .order_by_desc(Column::RequestedAt)
            .order_by_desc(Column::Id);

        let (items, pagination) = self.fetch_page(select, page, size).await?;
        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_profile_change()).collect(),
            pagination,
        })
    }

    /// 审核资料修改，通过时写回 users 表
    pub async fn review_profile_change_impl(
        &self,
        id: i64,
        approve: bool,
        reviewer_id: i64,
    ) -> Result<ProfileChange> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let existing = ProfileChanges::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| LmsError::not_found(format!("Profile change {id} not found")))?;

        if existing.status != ProfileChangeStatus::Pending.to_string() {
            return Err(LmsError::invalid_state(format!(
                "Profile change {id} has already been reviewed"
            )));
        }

        if approve {
            let user = Users::find_by_id(existing.user_id)
                .one(&txn)
                .await?
                .ok_or_else(|| LmsError::not_found(format!("User {} not found", existing.user_id)))?;

            let field = existing
                .field
                .parse::<ProfileField>()
                .map_err(LmsError::validation)?;
            let value = existing.new_value.clone();

            let mut user_model: UserActiveModel = user.into();
            match field {
                ProfileField::Email => user_model.email = Set(value),
                ProfileField::FullName => user_model.full_name = Set(value),
                ProfileField::Phone => user_model.phone = Set(Some(value)),
            }
            user_model.updated_at = Set(now);
            user_model.update(&txn).await.map_err(|e| {
                LmsError::database_operation(format!("Failed to apply profile change: {e}"))
            })?;
        }

        let status = if approve {
            ProfileChangeStatus::Approved
        } else {
            ProfileChangeStatus::Rejected
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(status.to_string());
        model.reviewed_at = Set(Some(now));
        model.reviewed_by = Set(Some(reviewer_id));
        let updated = model.update(&txn).await?;

        txn.commit().await?;
        Ok(updated.into_profile_change())
    }
}
