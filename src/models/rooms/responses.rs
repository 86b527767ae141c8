use serde::Serialize;
use ts_rs::TS;

use super::entities::Room;

// 教室详情（含 EAV 属性）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct RoomDetail {
    pub room: Room,
    #[ts(type = "Record<string, unknown>")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

// 预约冲突详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct ReservationConflictResponse {
    pub conflicts: usize,
    pub conflicting_ids: Vec<i64>,
}
