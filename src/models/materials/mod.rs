use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程资料
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct Material {
    pub id: i64,
    pub offered_course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_token: String,
    pub uploaded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct CreateMaterialRequest {
    pub title: String,
    pub description: Option<String>,
    pub file_token: String,
}
