//! 账号注册、审核与用户管理

pub mod register;
pub mod review;
pub mod students;
pub mod users;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::{
    entities::AccountAction,
    requests::{
        ApproveAccountRequest, AssignAdvisorRequest, LinkParentRequest, RegisterRequest,
        UserListParams,
    },
};
use crate::models::common::PaginationQuery;
use crate::services::respond;
use crate::storage::Storage;

pub struct AccountService {
    storage: Option<Arc<dyn Storage>>,
}

impl AccountService {
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

    pub async fn register(
        &self,
        req: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(register::register(self, req, request).await)
    }

    pub async fn list_pending(
        &self,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(review::list_pending(self, query, request).await)
    }

    pub async fn approve(
        &self,
        user_id: i64,
        req: ApproveAccountRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(review::approve(self, user_id, req, request).await)
    }

    /// reject / suspend / reactivate
    pub async fn change_status(
        &self,
        user_id: i64,
        action: AccountAction,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(review::change_status(self, user_id, action, request).await)
    }

    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(users::list_users(self, query, request).await)
    }

    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(users::get_user(self, user_id, request).await)
    }

    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(users::delete_user(self, user_id, request).await)
    }

    pub async fn assign_advisor(
        &self,
        student_id: i64,
        req: AssignAdvisorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(students::assign_advisor(self, student_id, req, request).await)
    }

    pub async fn link_parent(
        &self,
        student_id: i64,
        req: LinkParentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(students::link_parent(self, student_id, req, request).await)
    }
}
