//! 教学班实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub offered_course_id: i64,
    pub section_number: String,
    pub instructor_id: Option<i64>,
    pub room_id: Option<i64>,
    pub schedule: Option<String>,
    pub capacity: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_section(self) -> crate::models::catalog::entities::Section {
        use crate::models::catalog::entities::Section;
        use chrono::{DateTime, Utc};

        Section {
            id: self.id,
            offered_course_id: self.offered_course_id,
            section_number: self.section_number,
            instructor_id: self.instructor_id,
            room_id: self.room_id,
            schedule: self.schedule,
            capacity: self.capacity,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
