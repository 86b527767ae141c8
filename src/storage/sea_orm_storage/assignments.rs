use super::SeaOrmStorage;
use crate::entity::assignment_submissions::{
    ActiveModel as SubmissionActiveModel, Column as SubmissionColumn, Entity as Submissions,
};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{LmsError, Result};
use crate::models::assignments::{
    entities::{Assignment, Submission},
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        offered_course_id: i64,
        req: CreateAssignmentRequest,
        created_by: i64,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            offered_course_id: Set(offered_course_id),
            title: Set(req.title),
            description: Set(req.description),
            due_at: Set(req.due_at.timestamp()),
            max_points: Set(req.max_points),
            attachment_token: Set(req.attachment_token),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to create assignment: {e}"))
        })?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_impl(&self, offered_course_id: i64) -> Result<Vec<Assignment>> {
        let result = Assignments::find()
            .filter(Column::OfferedCourseId.eq(offered_course_id))
            .order_by_asc(Column::DueAt)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_assignment()).collect())
    }

    pub async fn update_assignment_impl(
        &self,
        id: i64,
        req: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = Assignments::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = req.title {
            model.title = Set(title);
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(due_at) = req.due_at {
            model.due_at = Set(due_at.timestamp());
        }
        if let Some(max_points) = req.max_points {
            model.max_points = Set(max_points);
        }
        if let Some(token) = req.attachment_token {
            model.attachment_token = Set(Some(token));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model.update(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to update assignment: {e}"))
        })?;
        Ok(Some(updated.into_assignment()))
    }

    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id).exec(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to delete assignment: {e}"))
        })?;
        Ok(result.rows_affected > 0)
    }

    pub async fn get_submission_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn find_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_submission()))
    }

    /// 已评分的提交不可覆盖
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        file_token: Option<String>,
        is_late: bool,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let existing = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .one(&txn)
            .await?;

        let saved = match existing {
            Some(submission) if submission.score.is_some() => {
                return Err(LmsError::conflict(
                    "Submission has already been graded and cannot be replaced",
                ));
            }
            Some(submission) => {
                let mut model: SubmissionActiveModel = submission.into();
                model.content = Set(content);
                model.file_token = Set(file_token);
                model.submitted_at = Set(now);
                model.is_late = Set(is_late);
                model.update(&txn).await?
            }
            None => {
                SubmissionActiveModel {
                    assignment_id: Set(assignment_id),
                    student_id: Set(student_id),
                    content: Set(content),
                    file_token: Set(file_token),
                    submitted_at: Set(now),
                    is_late: Set(is_late),
                    score: Set(None),
                    feedback: Set(None),
                    graded_at: Set(None),
                    graded_by: Set(None),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;
        Ok(saved.into_submission())
    }

    pub async fn list_submissions_impl(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .order_by_asc(SubmissionColumn::SubmittedAt)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn grade_submission_impl(
        &self,
        id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: SubmissionActiveModel = existing.into();
        model.score = Set(Some(score));
        model.feedback = Set(feedback);
        model.graded_at = Set(Some(chrono::Utc::now().timestamp()));
        model.graded_by = Set(Some(graded_by));

        let updated = model.update(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to grade submission: {e}"))
        })?;
        Ok(Some(updated.into_submission()))
    }
}
