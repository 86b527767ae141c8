use serde::Serialize;
use ts_rs::TS;

use super::entities::{Question, Quiz, StudentAnswer};

// 学生视图（不含参考答案）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct QuizDetailResponse {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct QuizResultResponse {
    pub quiz_id: i64,
    pub awarded: f64,
    pub max_points: f64,
    /// 待人工评分的题目数
    pub pending: i64,
    pub answers: Vec<StudentAnswer>,
}

impl QuizResultResponse {
    /// 汇总得分；max_points 取全部题目分值之和，未作答的题按 0 分计
    pub fn tally(quiz_id: i64, questions: &[Question], answers: Vec<StudentAnswer>) -> Self {
        let max_points = questions.iter().map(|q| q.points).sum();
        let awarded = answers.iter().filter_map(|a| a.points_awarded).sum();
        let pending = answers.iter().filter(|a| a.points_awarded.is_none()).count() as i64;
        Self {
            quiz_id,
            awarded,
            max_points,
            pending,
            answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::QuestionKind;

    fn question(id: i64, points: f64) -> Question {
        Question {
            id,
            quiz_id: 1,
            kind: QuestionKind::ShortAnswer,
            prompt: "?".into(),
            options: vec![],
            correct_answer: None,
            points,
            position: id as i32,
        }
    }

    fn answer(question_id: i64, points: Option<f64>) -> StudentAnswer {
        StudentAnswer {
            id: question_id,
            quiz_id: 1,
            question_id,
            student_id: 7,
            answer: "x".into(),
            is_correct: points.map(|p| p > 0.0),
            points_awarded: points,
            submitted_at: chrono::Utc::now(),
            graded_by: None,
        }
    }

    #[test]
    fn test_tally_counts_pending_and_unanswered() {
        let questions = vec![question(1, 5.0), question(2, 3.0), question(3, 2.0)];
        let result = QuizResultResponse::tally(1, &questions, vec![answer(1, Some(5.0)), answer(2, None)]);
        assert_eq!(result.max_points, 10.0);
        assert_eq!(result.awarded, 5.0);
        assert_eq!(result.pending, 1);
    }
}
