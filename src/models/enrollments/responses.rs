use serde::Serialize;
use ts_rs::TS;

use super::entities::Enrollment;
use crate::models::catalog::entities::{Course, OfferedCourse};

// 附带课程信息的选课记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct EnrollmentDetail {
    pub enrollment: Enrollment,
    pub offered_course: OfferedCourse,
    pub course: Course,
    /// 退课原因、审核备注等附加属性
    #[ts(type = "Record<string, unknown>")]
    pub notes: serde_json::Map<String, serde_json::Value>,
}

// 花名册条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct RosterEntry {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub student_number: String,
    pub full_name: String,
    pub email: String,
    pub section_id: Option<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct RosterResponse {
    pub offered_course_id: i64,
    pub items: Vec<RosterEntry>,
}
