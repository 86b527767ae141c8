use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct SendMessageRequest {
    pub recipient_id: i64,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct InboxParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default)]
    pub unread_only: Option<String>,
}

impl InboxParams {
    pub fn unread_only(&self) -> bool {
        matches!(self.unread_only.as_deref(), Some("true" | "1"))
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct SentParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}
