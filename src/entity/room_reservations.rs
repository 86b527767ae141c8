//! 教室预约实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "room_reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub room_id: i64,
    pub requested_by: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub purpose: String,
    pub status: String,
    pub created_at: i64,
    pub reviewed_at: Option<i64>,
    pub reviewed_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rooms::Entity",
        from = "Column::RoomId",
        to = "super::rooms::Column::Id"
    )]
    Room,
}

impl Related<super::rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_reservation(self) -> crate::models::rooms::entities::Reservation {
        use crate::models::rooms::entities::{Reservation, ReservationStatus};
        use chrono::{DateTime, Utc};

        Reservation {
            id: self.id,
            room_id: self.room_id,
            requested_by: self.requested_by,
            start_at: DateTime::<Utc>::from_timestamp(self.start_at, 0).unwrap_or_default(),
            end_at: DateTime::<Utc>::from_timestamp(self.end_at, 0).unwrap_or_default(),
            purpose: self.purpose,
            status: self
                .status
                .parse::<ReservationStatus>()
                .unwrap_or(ReservationStatus::Pending),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            reviewed_at: self
                .reviewed_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            reviewed_by: self.reviewed_by,
        }
    }
}
