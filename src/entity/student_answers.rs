//! 学生答案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub question_id: i64,
    pub student_id: i64,
    pub answer: String,
    pub is_correct: Option<bool>,
    pub points_awarded: Option<f64>,
    pub submitted_at: i64,
    pub graded_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_answer(self) -> crate::models::quizzes::entities::StudentAnswer {
        use crate::models::quizzes::entities::StudentAnswer;
        use chrono::{DateTime, Utc};

        StudentAnswer {
            id: self.id,
            quiz_id: self.quiz_id,
            question_id: self.question_id,
            student_id: self.student_id,
            answer: self.answer,
            is_correct: self.is_correct,
            points_awarded: self.points_awarded,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0).unwrap_or_default(),
            graded_by: self.graded_by,
        }
    }
}
