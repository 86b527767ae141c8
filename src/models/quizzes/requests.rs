use serde::Deserialize;
use ts_rs::TS;

use super::entities::QuestionKind;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: Option<String>,
    pub opens_at: chrono::DateTime<chrono::Utc>,
    pub closes_at: chrono::DateTime<chrono::Utc>,
    pub time_limit_minutes: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct AddQuestionRequest {
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: Option<String>,
    pub points: f64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct AnswerItem {
    pub question_id: i64,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct SubmitAnswersRequest {
    pub answers: Vec<AnswerItem>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct GradeAnswerRequest {
    pub points: f64,
}
