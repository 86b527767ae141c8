use serde::Deserialize;
use ts_rs::TS;

use super::entities::ReservationStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct CreateRoomRequest {
    pub name: String,
    pub building: Option<String>,
    pub capacity: i32,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub building: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct RoomListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct CreateReservationRequest {
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: chrono::DateTime<chrono::Utc>,
    pub purpose: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct ReservationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct AvailableRoomsParams {
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: chrono::DateTime<chrono::Utc>,
    pub min_capacity: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct RoomSearchParams {
    pub min_capacity: Option<i32>,
    /// 逗号分隔的布尔属性名，如 `projector,whiteboard`
    pub features: Option<String>,
}

impl RoomSearchParams {
    pub fn feature_list(&self) -> Vec<String> {
        self.features
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect()
    }
}

// 存储层查询参数
#[derive(Debug, Clone, Default)]
pub struct ReservationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub room_id: Option<i64>,
    pub requested_by: Option<i64>,
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<ReservationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_list_parsing() {
        let params = RoomSearchParams {
            min_capacity: None,
            features: Some(" projector, ,whiteboard ".into()),
        };
        assert_eq!(params.feature_list(), vec!["projector", "whiteboard"]);
    }
}
