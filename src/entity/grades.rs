//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub enrollment_id: i64,
    pub total_score: f64,
    pub letter: String,
    pub grade_points: f64,
    pub graded_by: i64,
    pub finalized_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enrollments::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollments::Column::Id"
    )]
    Enrollment,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        use crate::models::grades::entities::{Grade, LetterGrade};
        use chrono::{DateTime, Utc};

        Grade {
            id: self.id,
            enrollment_id: self.enrollment_id,
            total_score: self.total_score,
            letter: self
                .letter
                .parse::<LetterGrade>()
                .unwrap_or_else(|_| LetterGrade::from_total(self.total_score)),
            grade_points: self.grade_points,
            graded_by: self.graded_by,
            finalized_at: DateTime::<Utc>::from_timestamp(self.finalized_at, 0).unwrap_or_default(),
        }
    }
}
