//! 成绩组成、分项成绩录入、总评与成绩单

pub mod components;
pub mod finalize;
pub mod scores;
pub mod views;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::{RecordScoreRequest, SetComponentsRequest};
use crate::services::respond;
use crate::storage::Storage;

pub struct GradingService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradingService {
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

    pub async fn set_components(
        &self,
        offered_course_id: i64,
        req: SetComponentsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(components::set_components(self, offered_course_id, req, request).await)
    }

    pub async fn get_components(
        &self,
        offered_course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(components::get_components(self, offered_course_id, request).await)
    }

    pub async fn record_score(
        &self,
        enrollment_id: i64,
        req: RecordScoreRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(scores::record_score(self, enrollment_id, req, request).await)
    }

    pub async fn finalize(
        &self,
        enrollment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(finalize::finalize(self, enrollment_id, request).await)
    }

    pub async fn enrollment_grade(
        &self,
        enrollment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(views::enrollment_grade(self, enrollment_id, request).await)
    }

    pub async fn my_transcript(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(views::my_transcript(self, request).await)
    }
}
