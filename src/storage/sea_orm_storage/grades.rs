use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::offered_courses::{Column as OfferedColumn, Entity as OfferedCourses};
use crate::errors::{LmsError, Result};
use crate::models::grades::{
    entities::{Grade, LetterGrade},
    responses::TranscriptEntry,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 写入或覆盖最终成绩
    pub async fn upsert_grade_impl(
        &self,
        enrollment_id: i64,
        total_score: f64,
        letter: LetterGrade,
        graded_by: i64,
    ) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let existing = Grades::find()
            .filter(Column::EnrollmentId.eq(enrollment_id))
            .one(&txn)
            .await?;

        let saved = match existing {
            Some(grade) => {
                let mut model: ActiveModel = grade.into();
                model.total_score = Set(total_score);
                model.letter = Set(letter.to_string());
                model.grade_points = Set(letter.grade_points());
                model.graded_by = Set(graded_by);
                model.finalized_at = Set(now);
                model.update(&txn).await
            }
            None => {
                ActiveModel {
                    enrollment_id: Set(enrollment_id),
                    total_score: Set(total_score),
                    letter: Set(letter.to_string()),
                    grade_points: Set(letter.grade_points()),
                    graded_by: Set(graded_by),
                    finalized_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
            }
        }
        .map_err(|e| LmsError::database_operation(format!("Failed to save grade: {e}")))?;

        txn.commit().await?;
        Ok(saved.into_grade())
    }

    pub async fn get_grade_by_enrollment_impl(&self, enrollment_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::EnrollmentId.eq(enrollment_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query grade: {e}")))?;
        Ok(result.map(|m| m.into_grade()))
    }

    /// 成绩单：已出成绩的选课及对应课程
    pub async fn list_transcript_impl(&self, student_id: i64) -> Result<Vec<TranscriptEntry>> {
        let rows = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .find_also_related(Grades)
            .order_by_asc(EnrollmentColumn::Id)
            .all(&self.db)
            .await?;

        let graded: Vec<_> = rows
            .into_iter()
            .filter_map(|(enrollment, grade)| grade.map(|g| (enrollment, g)))
            .collect();
        if graded.is_empty() {
            return Ok(Vec::new());
        }

        let offered_ids: Vec<i64> = graded.iter().map(|(e, _)| e.offered_course_id).collect();
        let offerings: HashMap<i64, crate::entity::offered_courses::Model> = OfferedCourses::find()
            .filter(OfferedColumn::Id.is_in(offered_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|o| (o.id, o))
            .collect();

        let course_ids: Vec<i64> = offerings.values().map(|o| o.course_id).collect();
        let courses: HashMap<i64, crate::entity::courses::Model> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let entries = graded
            .into_iter()
            .filter_map(|(enrollment, grade)| {
                let offering = offerings.get(&enrollment.offered_course_id)?;
                let course = courses.get(&offering.course_id)?;
                Some(TranscriptEntry {
                    enrollment_id: enrollment.id,
                    offered_course_id: offering.id,
                    semester_id: offering.semester_id,
                    course_code: course.code.clone(),
                    course_title: course.title.clone(),
                    credits: course.credits,
                    grade: grade.into_grade(),
                })
            })
            .collect();

        Ok(entries)
    }
}
