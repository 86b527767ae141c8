use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::grades::Entity as Grades;
use crate::entity::offered_courses::{
    ActiveModel as OfferedActiveModel, Column as OfferedColumn, Entity as OfferedCourses,
};
use crate::entity::students::Entity as Students;
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginatedResponse,
    attributes::{AttributeValue, EntityType},
    enrollments::{
        entities::{Enrollment, EnrollmentAction, EnrollmentStatus},
        responses::RosterEntry,
    },
    grades::entities::LetterGrade,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建待审核的选课记录
    pub async fn create_enrollment_impl(
        &self,
        student_id: i64,
        offered_course_id: i64,
        section_id: Option<i64>,
    ) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            student_id: Set(student_id),
            offered_course_id: Set(offered_course_id),
            section_id: Set(section_id),
            status: Set(EnrollmentStatus::Pending.to_string()),
            requested_at: Set(now),
            updated_at: Set(now),
            reviewed_by: Set(None),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to create enrollment: {e}"))
        })?;

        Ok(result.into_enrollment())
    }

    pub async fn get_enrollment_impl(&self, id: i64) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn find_active_enrollment_impl(
        &self,
        student_id: i64,
        offered_course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::OfferedCourseId.eq(offered_course_id))
            .filter(Column::Status.is_in(EnrollmentStatus::active_values()))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn list_student_enrollments_impl(
        &self,
        student_id: i64,
        semester_id: Option<i64>,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<Enrollment>> {
        let mut select = Enrollments::find().filter(Column::StudentId.eq(student_id));

        if let Some(semester_id) = semester_id {
            select = select
                .join(
                    JoinType::InnerJoin,
                    crate::entity::enrollments::Relation::OfferedCourse.def(),
                )
                .filter(OfferedColumn::SemesterId.eq(semester_id));
        }

        let select = select
            .order_by_desc(Column::RequestedAt)
            .order_by_desc(Column::Id);
        let (items, pagination) = self.fetch_page(select, page, size).await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_enrollment()).collect(),
            pagination,
        })
    }

    pub async fn list_enrollments_by_student_impl(
        &self,
        student_id: i64,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<Enrollment>> {
        let mut select = Enrollments::find().filter(Column::StudentId.eq(student_id));
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        let result = select.order_by_asc(Column::Id).all(&self.db).await?;
        Ok(result.into_iter().map(|m| m.into_enrollment()).collect())
    }

    /// 学期内 pending/approved/drop_pending 选课的学分合计
    pub async fn active_credits_in_semester_impl(
        &self,
        student_id: i64,
        semester_id: i64,
    ) -> Result<i64> {
        let rows = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.is_in(EnrollmentStatus::active_values()))
            .find_also_related(OfferedCourses)
            .all(&self.db)
            .await?;

        let course_ids: Vec<i64> = rows
            .into_iter()
            .filter_map(|(_, offered)| offered)
            .filter(|o| o.semester_id == semester_id)
            .map(|o| o.course_id)
            .collect();

        if course_ids.is_empty() {
            return Ok(0);
        }

        let credits: HashMap<i64, i32> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids.iter().copied()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.credits))
            .collect();

        Ok(course_ids
            .iter()
            .map(|id| credits.get(id).copied().unwrap_or(0) as i64)
            .sum())
    }

    /// 已取得及格成绩的课程 id
    pub async fn passed_course_ids_impl(&self, student_id: i64) -> Result<HashSet<i64>> {
        let graded = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(Grades)
            .all(&self.db)
            .await?;

        let offered_ids: Vec<i64> = graded
            .into_iter()
            .filter_map(|(enrollment, grade)| {
                let grade = grade?;
                let passing = grade
                    .letter
                    .parse::<LetterGrade>()
                    .map(|l| l.is_passing())
                    .unwrap_or(false);
                passing.then_some(enrollment.offered_course_id)
            })
            .collect();

        if offered_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let offerings = OfferedCourses::find()
            .filter(OfferedColumn::Id.is_in(offered_ids))
            .all(&self.db)
            .await?;
        Ok(offerings.into_iter().map(|o| o.course_id).collect())
    }

    pub async fn list_enrollments_awaiting_review_impl(
        &self,
        student_ids: &[i64],
    ) -> Result<Vec<Enrollment>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = Enrollments::find()
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .filter(Column::Status.is_in([
                EnrollmentStatus::Pending.to_string(),
                EnrollmentStatus::DropPending.to_string(),
            ]))
            .order_by_asc(Column::RequestedAt)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_enrollment()).collect())
    }

    /// 花名册：已批准的选课
    pub async fn list_roster_impl(&self, offered_course_id: i64) -> Result<Vec<RosterEntry>> {
        let rows = Enrollments::find()
            .filter(Column::OfferedCourseId.eq(offered_course_id))
            .filter(Column::Status.eq(EnrollmentStatus::Approved.to_string()))
            .find_also_related(Students)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        let user_ids: Vec<i64> = rows
            .iter()
            .filter_map(|(_, s)| s.as_ref().map(|s| s.user_id))
            .collect();
        let users: HashMap<i64, crate::entity::users::Model> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(user_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect()
        };

        let entries = rows
            .into_iter()
            .filter_map(|(enrollment, student)| {
                let student = student?;
                let user = users.get(&student.user_id)?;
                Some(RosterEntry {
                    enrollment_id: enrollment.id,
                    student_id: student.id,
                    student_number: student.student_number,
                    full_name: user.full_name.clone(),
                    email: user.email.clone(),
                    section_id: enrollment.section_id,
                })
            })
            .collect();

        Ok(entries)
    }

    /// 执行状态转换，名额变化与状态更新在同一事务内完成
    pub async fn transition_enrollment_impl(
        &self,
        id: i64,
        action: EnrollmentAction,
        actor_id: i64,
        note: Option<(String, AttributeValue)>,
    ) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let existing = Enrollments::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| LmsError::not_found(format!("Enrollment {id} not found")))?;

        let from = existing
            .status
            .parse::<EnrollmentStatus>()
            .map_err(LmsError::invalid_state)?;
        let transition = from.apply(action).map_err(LmsError::invalid_state)?;

        if transition.seat_delta != 0 {
            let offering = OfferedCourses::find_by_id(existing.offered_course_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    LmsError::not_found(format!(
                        "Offered course {} not found",
                        existing.offered_course_id
                    ))
                })?;

            let enrolled = offering.enrolled_count + transition.seat_delta;
            if transition.seat_delta > 0 && enrolled > offering.capacity {
                return Err(LmsError::conflict(format!(
                    "Offered course {} is full ({} seats)",
                    offering.id, offering.capacity
                )));
            }

            let mut offering_model: OfferedActiveModel = offering.into();
            offering_model.enrolled_count = Set(enrolled.max(0));
            offering_model.updated_at = Set(now);
            offering_model.update(&txn).await?;
        }

        let mut model: ActiveModel = existing.into();
        model.status = Set(transition.to.to_string());
        model.updated_at = Set(now);
        if action != EnrollmentAction::RequestDrop {
            model.reviewed_by = Set(Some(actor_id));
        }
        let updated = model.update(&txn).await?;

        if let Some((name, value)) = note {
            Self::upsert_attribute_row(&txn, EntityType::Enrollment, id, &name, &value).await?;
        }

        txn.commit().await?;
        Ok(updated.into_enrollment())
    }

    /// 删除选课记录前释放其占用的名额，并清理选课上的属性
    pub(super) async fn release_enrollments<C: ConnectionTrait>(
        conn: &C,
        rows: Vec<Model>,
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut seats: HashMap<i64, i32> = HashMap::new();
        for row in &rows {
            let holds_seat = row
                .status
                .parse::<EnrollmentStatus>()
                .is_ok_and(|status| status.holds_seat());
            if holds_seat {
                *seats.entry(row.offered_course_id).or_default() += 1;
            }
        }

        let now = chrono::Utc::now().timestamp();
        for (offered_course_id, released) in seats {
            if let Some(offering) = OfferedCourses::find_by_id(offered_course_id).one(conn).await? {
                let enrolled = (offering.enrolled_count - released).max(0);
                let mut model: OfferedActiveModel = offering.into();
                model.enrolled_count = Set(enrolled);
                model.updated_at = Set(now);
                model.update(conn).await?;
            }
        }

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        Self::delete_attributes_of(conn, EntityType::Enrollment, &ids).await?;
        Enrollments::delete_many()
            .filter(Column::Id.is_in(ids))
            .exec(conn)
            .await?;
        Ok(())
    }
}
