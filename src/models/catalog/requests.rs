use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CreateDepartmentRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CreateSemesterRequest {
    pub name: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CreateCourseRequest {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i32,
    pub department_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub department_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub department_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct AddPrerequisiteRequest {
    pub prerequisite_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CreateOfferedCourseRequest {
    pub course_id: i64,
    pub semester_id: i64,
    pub instructor_id: i64,
    pub capacity: i32,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct UpdateOfferedCourseRequest {
    pub instructor_id: Option<i64>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct OfferedCourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub semester_id: Option<i64>,
    pub course_id: Option<i64>,
    pub instructor_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CreateSectionRequest {
    pub section_number: String,
    pub instructor_id: Option<i64>,
    pub room_id: Option<i64>,
    pub schedule: Option<String>,
    pub capacity: i32,
}

// 存储层查询参数
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OfferedCourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub semester_id: Option<i64>,
    pub course_id: Option<i64>,
    pub instructor_id: Option<i64>,
}
