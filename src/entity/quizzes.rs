//! 测验实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub offered_course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub opens_at: i64,
    pub closes_at: i64,
    pub time_limit_minutes: Option<i32>,
    pub created_by: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_quiz(self) -> crate::models::quizzes::entities::Quiz {
        use crate::models::quizzes::entities::Quiz;
        use chrono::{DateTime, Utc};

        Quiz {
            id: self.id,
            offered_course_id: self.offered_course_id,
            title: self.title,
            description: self.description,
            opens_at: DateTime::<Utc>::from_timestamp(self.opens_at, 0).unwrap_or_default(),
            closes_at: DateTime::<Utc>::from_timestamp(self.closes_at, 0).unwrap_or_default(),
            time_limit_minutes: self.time_limit_minutes,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
