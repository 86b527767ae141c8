use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct UnreadCountResponse {
    pub unread: u64,
}
