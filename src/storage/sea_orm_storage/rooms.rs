//! 教室与预约存储操作

use super::SeaOrmStorage;
use crate::entity::room_reservations::{
    ActiveModel as ReservationActiveModel, Column as ReservationColumn, Entity as RoomReservations,
};
use crate::entity::rooms::{ActiveModel, Column, Entity as Rooms};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginatedResponse,
    rooms::{
        entities::{
            Reservation, ReservationOutcome, ReservationStatus, Room, TimeRange, find_conflicts,
        },
        requests::{CreateRoomRequest, ReservationListQuery, UpdateRoomRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    // ----- 教室 -----

    pub async fn create_room_impl(&self, req: CreateRoomRequest) -> Result<Room> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            name: Set(req.name),
            building: Set(req.building),
            capacity: Set(req.capacity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to create room: {e}")))?;
        Ok(result.into_room())
    }

    pub async fn get_room_impl(&self, id: i64) -> Result<Option<Room>> {
        let result = Rooms::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_room()))
    }

    pub async fn get_room_by_name_impl(&self, name: &str) -> Result<Option<Room>> {
        let result = Rooms::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_room()))
    }

    pub async fn list_rooms_impl(&self, page: u64, size: u64) -> Result<PaginatedResponse<Room>> {
        let select = Rooms::find().order_by_asc(Column::Name);
        let (items, pagination) = self.fetch_page(select, page, size).await?;
        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_room()).collect(),
            pagination,
        })
    }

    pub async fn list_rooms_with_capacity_impl(&self, min_capacity: Option<i32>) -> Result<Vec<Room>> {
        let mut select = Rooms::find();
        if let Some(min) = min_capacity {
            select = select.filter(Column::Capacity.gte(min));
        }
        let result = select.order_by_asc(Column::Name).all(&self.db).await?;
        Ok(result.into_iter().map(|m| m.into_room()).collect())
    }

    pub async fn update_room_impl(&self, id: i64, req: UpdateRoomRequest) -> Result<Option<Room>> {
        let Some(existing) = Rooms::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(building) = req.building {
            model.building = Set(Some(building));
        }
        if let Some(capacity) = req.capacity {
            model.capacity = Set(capacity);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to update room: {e}")))?;
        Ok(Some(updated.into_room()))
    }

    pub async fn delete_room_impl(&self, id: i64) -> Result<bool> {
        let result = Rooms::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to delete room: {e}")))?;
        Ok(result.rows_affected > 0)
    }

    // ----- 预约 -----

    /// 与区间可能重叠的已批准预约，room_id 为 None 时不限教室
    async fn approved_candidates<C: ConnectionTrait>(
        conn: &C,
        room_id: Option<i64>,
        range: &TimeRange,
        exclude_id: Option<i64>,
    ) -> Result<Vec<Reservation>> {
        let mut select = RoomReservations::find()
            .filter(ReservationColumn::Status.eq(ReservationStatus::Approved.to_string()))
            .filter(ReservationColumn::StartAt.lt(range.end.timestamp()))
            .filter(ReservationColumn::EndAt.gt(range.start.timestamp()));
        if let Some(room_id) = room_id {
            select = select.filter(ReservationColumn::RoomId.eq(room_id));
        }
        if let Some(id) = exclude_id {
            select = select.filter(ReservationColumn::Id.ne(id));
        }

        let rows = select
            .order_by_asc(ReservationColumn::StartAt)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(|m| m.into_reservation()).collect())
    }

    /// 冲突检测与写入在同一事务内
    pub async fn create_reservation_impl(
        &self,
        room_id: i64,
        requested_by: i64,
        range: TimeRange,
        purpose: String,
    ) -> Result<ReservationOutcome> {
        let txn = self.db.begin().await?;

        let approved = Self::approved_candidates(&txn, Some(room_id), &range, None).await?;
        let conflicts = find_conflicts(&range, &approved);
        if !conflicts.is_empty() {
            return Ok(ReservationOutcome::Conflicted(conflicts));
        }

        let model = ReservationActiveModel {
            room_id: Set(room_id),
            requested_by: Set(requested_by),
            start_at: Set(range.start.timestamp()),
            end_at: Set(range.end.timestamp()),
            purpose: Set(purpose),
            status: Set(ReservationStatus::Pending.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            reviewed_at: Set(None),
            reviewed_by: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| LmsError::database_operation(format!("Failed to create reservation: {e}")))?;

        txn.commit().await?;
        Ok(ReservationOutcome::Accepted(model.into_reservation()))
    }

    pub async fn get_reservation_impl(&self, id: i64) -> Result<Option<Reservation>> {
        let result = RoomReservations::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_reservation()))
    }

    pub async fn list_reservations_impl(
        &self,
        query: ReservationListQuery,
    ) -> Result<PaginatedResponse<Reservation>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = RoomReservations::find();
        if let Some(room_id) = query.room_id {
            select = select.filter(ReservationColumn::RoomId.eq(room_id));
        }
        if let Some(requested_by) = query.requested_by {
            select = select.filter(ReservationColumn::RequestedBy.eq(requested_by));
        }
        if let Some(status) = query.status {
            select = select.filter(ReservationColumn::Status.eq(status.to_string()));
        }
        // 与 [from, to) 有交集的预约
        if let Some(from) = query.from {
            select = select.filter(ReservationColumn::EndAt.gt(from.timestamp()));
        }
        if let Some(to) = query.to {
            select = select.filter(ReservationColumn::StartAt.lt(to.timestamp()));
        }
        let select = select
            .order_by_asc(ReservationColumn::StartAt)
            .order_by_asc(ReservationColumn::Id);

        let (items, pagination) = self.fetch_page(select, page, size).await?;
        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_reservation()).collect(),
            pagination,
        })
    }

    pub async fn list_approved_overlapping_impl(&self, range: TimeRange) -> Result<Vec<Reservation>> {
        let approved = Self::approved_candidates(&self.db, None, &range, None).await?;
        Ok(approved
            .into_iter()
            .filter(|r| r.range().overlaps(&range))
            .collect())
    }

    /// 审批通过前在事务内重新检测冲突
    pub async fn approve_reservation_impl(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<ReservationOutcome> {
        let txn = self.db.begin().await?;

        let existing = RoomReservations::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| LmsError::not_found(format!("Reservation {id} not found")))?;

        let current = existing.clone().into_reservation();
        if !current.status.can_approve() {
            return Err(LmsError::invalid_state(format!(
                "Only pending reservations can be approved, reservation is '{}'",
                current.status
            )));
        }

        let range = current.range();
        let approved =
            Self::approved_candidates(&txn, Some(current.room_id), &range, Some(id)).await?;
        let conflicts = find_conflicts(&range, &approved);
        if !conflicts.is_empty() {
            return Ok(ReservationOutcome::Conflicted(conflicts));
        }

        let mut model: ReservationActiveModel = existing.into();
        model.status = Set(ReservationStatus::Approved.to_string());
        model.reviewed_at = Set(Some(chrono::Utc::now().timestamp()));
        model.reviewed_by = Set(Some(reviewer_id));
        let updated = model.update(&txn).await?;

        txn.commit().await?;
        Ok(ReservationOutcome::Accepted(updated.into_reservation()))
    }

    /// 驳回（仅 pending）或取消（pending/approved）
    pub async fn close_reservation_impl(
        &self,
        id: i64,
        status: ReservationStatus,
        actor_id: i64,
    ) -> Result<Reservation> {
        let txn = self.db.begin().await?;

        let existing = RoomReservations::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| LmsError::not_found(format!("Reservation {id} not found")))?;
        let current = existing
            .status
            .parse::<ReservationStatus>()
            .map_err(LmsError::invalid_state)?;

        let allowed = match status {
            ReservationStatus::Rejected => current.can_reject(),
            ReservationStatus::Cancelled => current.can_cancel(),
            _ => {
                return Err(LmsError::validation(format!(
                    "Reservation cannot be closed as '{status}'"
                )));
            }
        };
        if !allowed {
            return Err(LmsError::invalid_state(format!(
                "Reservation in status '{current}' cannot become '{status}'"
            )));
        }

        let mut model: ReservationActiveModel = existing.into();
        model.status = Set(status.to_string());
        model.reviewed_at = Set(Some(chrono::Utc::now().timestamp()));
        model.reviewed_by = Set(Some(actor_id));
        let updated = model.update(&txn).await?;

        txn.commit().await?;
        Ok(updated.into_reservation())
    }
}
