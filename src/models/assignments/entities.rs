use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub offered_course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_at: chrono::DateTime<chrono::Utc>,
    pub max_points: f64,
    pub attachment_token: Option<String>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    pub fn is_late_at(&self, at: chrono::DateTime<chrono::Utc>) -> bool {
        at > self.due_at
    }
}

// 作业提交
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    pub file_token: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub is_late: bool,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_by: Option<i64>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.score.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_late_flag() {
        let now = Utc::now();
        let assignment = Assignment {
            id: 1,
            offered_course_id: 1,
            title: "HW1".into(),
            description: None,
            due_at: now,
            max_points: 100.0,
            attachment_token: None,
            created_by: 1,
            created_at: now,
            updated_at: now,
        };
        assert!(!assignment.is_late_at(now));
        assert!(assignment.is_late_at(now + Duration::seconds(1)));
    }
}
