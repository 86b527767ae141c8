use serde::Serialize;
use ts_rs::TS;

use super::entities::{Course, OfferedCourse, Section};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

// 课程详情（含先修课程）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CourseDetailResponse {
    pub course: Course,
    pub prerequisites: Vec<Course>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct OfferedCourseListResponse {
    pub items: Vec<OfferedCourse>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct OfferedCourseDetailResponse {
    pub offered_course: OfferedCourse,
    pub course: Course,
    pub sections: Vec<Section>,
}
