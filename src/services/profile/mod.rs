//! 个人资料与资料变更审核

pub mod changes;
pub mod get;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::common::PaginationQuery;
use crate::models::profile::requests::ProfileChangeRequest;
use crate::services::respond;
use crate::storage::Storage;

pub struct ProfileService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfileService {
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

    pub async fn get_my_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(get::get_my_profile(self, request).await)
    }

    pub async fn request_change(
        &self,
        req: ProfileChangeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(changes::request_change(self, req, request).await)
    }

    pub async fn list_my_changes(
        &self,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(changes::list_my_changes(self, query, request).await)
    }

    pub async fn list_pending_changes(
        &self,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(changes::list_pending_changes(self, query, request).await)
    }

    pub async fn review_change(
        &self,
        change_id: i64,
        approve: bool,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(changes::review_change(self, change_id, approve, request).await)
    }
}
