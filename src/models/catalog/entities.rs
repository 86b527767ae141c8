use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 院系
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct Department {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 学期
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct Semester {
    pub id: i64,
    pub name: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i32,
    pub department_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 课程学分范围
pub const MIN_CREDITS: i32 = 1;
pub const MAX_CREDITS: i32 = 10;

// 先修关系
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct Prerequisite {
    pub course_id: i64,
    pub prerequisite_id: i64,
}

// 开课（某学期的课程实例）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct OfferedCourse {
    pub id: i64,
    pub course_id: i64,
    pub semester_id: i64,
    /// instructors.id
    pub instructor_id: i64,
    pub capacity: i32,
    pub enrolled_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl OfferedCourse {
    pub fn is_full(&self) -> bool {
        self.enrolled_count >= self.capacity
    }

    pub fn remaining_seats(&self) -> i32 {
        (self.capacity - self.enrolled_count).max(0)
    }
}

// 教学班
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct Section {
    pub id: i64,
    pub offered_course_id: i64,
    pub section_number: String,
    pub instructor_id: Option<i64>,
    pub room_id: Option<i64>,
    pub schedule: Option<String>,
    pub capacity: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
