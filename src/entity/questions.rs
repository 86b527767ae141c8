//! 题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub kind: String,
    pub prompt: String,
    /// JSON 数组
    pub options: String,
    pub correct_answer: Option<String>,
    pub points: f64,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_question(self) -> crate::models::quizzes::entities::Question {
        use crate::models::quizzes::entities::{Question, QuestionKind};

        Question {
            id: self.id,
            quiz_id: self.quiz_id,
            kind: self
                .kind
                .parse::<QuestionKind>()
                .unwrap_or(QuestionKind::ShortAnswer),
            prompt: self.prompt,
            options: serde_json::from_str(&self.options).unwrap_or_default(),
            correct_answer: self.correct_answer,
            points: self.points,
            position: self.position,
        }
    }
}
