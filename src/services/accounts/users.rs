use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};

use super::AccountService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::User,
        requests::{UserListParams, UserListQuery},
        responses::UserDetailResponse,
    },
};
use crate::services::{OrRespond, Reply, bad_request, current_user, forget_user, not_found};
use crate::storage::Storage;

/// 用户连同学生/教师档案
pub(crate) async fn user_detail(
    storage: &Arc<dyn Storage>,
    user: User,
) -> Result<UserDetailResponse, HttpResponse> {
    let student = storage
        .get_student_by_user_id(user.id)
        .await
        .or_respond(ErrorCode::StudentProfileNotFound)?;
    let instructor = storage
        .get_instructor_by_user_id(user.id)
        .await
        .or_respond(ErrorCode::InstructorProfileNotFound)?;
    Ok(UserDetailResponse {
        user,
        student,
        instructor,
    })
}

pub async fn list_users(
    service: &AccountService,
    query: UserListParams,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let list_query = UserListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        role: query.role,
        status: query.status,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    let response = storage
        .list_users_with_pagination(list_query)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "User list retrieved successfully",
    )))
}

pub async fn get_user(service: &AccountService, user_id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let user = storage
        .get_user_by_id(user_id)
        .await
        .or_respond(ErrorCode::UserNotFound)?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;
    let detail = user_detail(&storage, user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        detail,
        "User information retrieved successfully",
    )))
}

pub async fn delete_user(service: &AccountService, user_id: i64, request: &HttpRequest) -> Reply {
    let actor = current_user(request)?;
    if actor.id == user_id {
        return Err(bad_request(
            ErrorCode::BadRequest,
            "You cannot delete your own account",
        ));
    }

    let storage = service.get_storage(request);
    let deleted = storage
        .delete_user(user_id)
        .await
        .or_respond(ErrorCode::UserNotFound)?;
    if !deleted {
        return Err(not_found(ErrorCode::UserNotFound, "User not found"));
    }

    forget_user(request, user_id).await;
    tracing::info!("User {} deleted by {}", user_id, actor.username);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
}
