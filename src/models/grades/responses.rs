use serde::Serialize;
use ts_rs::TS;

use super::entities::{Grade, GradeComponent, credit_weighted_gpa};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeComponentsResponse {
    pub offered_course_id: i64,
    pub components: Vec<GradeComponent>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct ComponentScore {
    pub name: String,
    pub weight: f64,
    pub score: Option<f64>,
}

// 单门课成绩明细
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct EnrollmentGradeResponse {
    pub enrollment_id: i64,
    pub components: Vec<ComponentScore>,
    /// 按当前已录入分数计算的加权总分
    pub current_total: f64,
    pub grade: Option<Grade>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct TranscriptEntry {
    pub enrollment_id: i64,
    pub offered_course_id: i64,
    pub semester_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub credits: i32,
    pub grade: Grade,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct TranscriptResponse {
    pub student_id: i64,
    pub entries: Vec<TranscriptEntry>,
    pub total_credits: i32,
    pub gpa: Option<f64>,
}

impl TranscriptResponse {
    /// 汇总学分与按学分加权的 GPA
    pub fn from_entries(student_id: i64, entries: Vec<TranscriptEntry>) -> Self {
        let total_credits = entries.iter().map(|e| e.credits).sum();
        let gpa = credit_weighted_gpa(entries.iter().map(|e| (e.grade.grade_points, e.credits)));
        Self {
            student_id,
            entries,
            total_credits,
            gpa,
        }
    }
}
