//! 选课申请、退课与导师审核

pub mod advising;
pub mod details;
pub mod drop_request;
pub mod list;
pub mod request;
pub mod roster;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ErrorCode,
    attributes::{AttributeSchema, AttributeValue, EntityType},
    enrollments::requests::{DropRequest, EnrollRequest, MyEnrollmentParams, ReviewRequest},
};
use crate::services::{bad_request, respond};
use crate::storage::Storage;

/// 校验随状态转换写入的文本备注，空白视为未填写
pub(crate) fn checked_note(
    name: &str,
    text: Option<String>,
) -> Result<Option<(String, AttributeValue)>, HttpResponse> {
    let Some(text) = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    AttributeSchema::check(EntityType::Enrollment, name, AttributeValue::Text(text))
        .map(|value| Some((name.to_string(), value)))
        .map_err(|msg| bad_request(ErrorCode::AttributeInvalid, msg))
}

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    pub async fn request_enrollment(
        &self,
        req: EnrollRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(request::request_enrollment(self, req, request).await)
    }

    pub async fn list_my_enrollments(
        &self,
        query: MyEnrollmentParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(list::list_my_enrollments(self, query, request).await)
    }

    pub async fn request_drop(
        &self,
        enrollment_id: i64,
        req: DropRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(drop_request::request_drop(self, enrollment_id, req, request).await)
    }

    pub async fn list_advising_requests(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(advising::list_advising_requests(self, request).await)
    }

    pub async fn review(
        &self,
        enrollment_id: i64,
        approve: bool,
        req: ReviewRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(advising::review(self, enrollment_id, approve, req, request).await)
    }

    pub async fn roster(
        &self,
        offered_course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(roster::roster(self, offered_course_id, request).await)
    }
}
