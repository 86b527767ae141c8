use serde::Deserialize;
use ts_rs::TS;

use super::entities::GradeComponent;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct SetComponentsRequest {
    pub components: Vec<GradeComponent>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct RecordScoreRequest {
    pub component: String,
    pub score: f64,
}
