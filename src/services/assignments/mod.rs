//! 作业发布、提交与评分

pub mod manage;
pub mod submissions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{
    CreateAssignmentRequest, GradeSubmissionRequest, SubmitAssignmentRequest,
    UpdateAssignmentRequest,
};
use crate::services::respond;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_assignment(
        &self,
        offered_course_id: i64,
        req: CreateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(manage::create_assignment(self, offered_course_id, req, request).await)
    }

    pub async fn list_assignments(
        &self,
        offered_course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(manage::list_assignments(self, offered_course_id, request).await)
    }

    pub async fn get_assignment(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(manage::get_assignment(self, assignment_id, request).await)
    }

    pub async fn update_assignment(
        &self,
        assignment_id: i64,
        req: UpdateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(manage::update_assignment(self, assignment_id, req, request).await)
    }

    pub async fn delete_assignment(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(manage::delete_assignment(self, assignment_id, request).await)
    }

    pub async fn submit(
        &self,
        assignment_id: i64,
        req: SubmitAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(submissions::submit(self, assignment_id, req, request).await)
    }

    pub async fn my_submission(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(submissions::my_submission(self, assignment_id, request).await)
    }

    pub async fn list_submissions(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(submissions::list_submissions(self, assignment_id, request).await)
    }

    pub async fn grade_submission(
        &self,
        submission_id: i64,
        req: GradeSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(submissions::grade_submission(self, submission_id, req, request).await)
    }
}
