use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use chrono::Datelike;

use super::{AccountService, users::user_detail};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    common::PaginationQuery,
    users::{
        entities::{AccountAction, UserRole, UserStatus},
        requests::{ApprovalProfile, ApproveAccountRequest, UserListQuery},
        responses::UserResponse,
    },
};
use crate::services::{
    OrRespond, Reply, bad_request, conflict, current_user, forget_user, not_found,
};
use crate::storage::Storage;
use crate::utils::random_code::generate_student_number;

const STUDENT_NUMBER_ATTEMPTS: usize = 10;

pub async fn list_pending(
    service: &AccountService,
    query: PaginationQuery,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let (page, size) = query.normalized();

    let list_query = UserListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        status: Some(UserStatus::Pending),
        ..Default::default()
    };

    let response = storage
        .list_users_with_pagination(list_query)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Pending accounts retrieved successfully",
    )))
}

/// 审核通过并按角色创建档案；学生获得唯一学号
pub async fn approve(
    service: &AccountService,
    user_id: i64,
    req: ApproveAccountRequest,
    request: &HttpRequest,
) -> Reply {
    let admin = current_user(request)?;
    let storage = service.get_storage(request);

    let user = storage
        .get_user_by_id(user_id)
        .await
        .or_respond(ErrorCode::UserNotFound)?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;
    if AccountAction::Approve.apply(user.status).is_none() {
        return Err(conflict(
            ErrorCode::AccountStateInvalid,
            format!(
                "Only pending accounts can be approved, account is '{}'",
                user.status
            ),
        ));
    }

    let department_id = req.department_id.or(user.department_id);
    if let Some(id) = department_id {
        storage
            .get_department(id)
            .await
            .or_respond(ErrorCode::DepartmentNotFound)?
            .ok_or_else(|| bad_request(ErrorCode::DepartmentNotFound, "Department not found"))?;
    }

    let profile = match user.role {
        UserRole::Student => {
            if let Some(advisor_id) = req.advisor_id {
                storage
                    .get_instructor_by_id(advisor_id)
                    .await
                    .or_respond(ErrorCode::InstructorProfileNotFound)?
                    .ok_or_else(|| {
                        bad_request(ErrorCode::InstructorProfileNotFound, "Advisor not found")
                    })?;
            }
            let enrollment_year = chrono::Utc::now().year();
            ApprovalProfile::Student {
                student_number: unique_student_number(&storage, enrollment_year).await?,
                department_id,
                advisor_id: req.advisor_id,
                enrollment_year,
            }
        }
        UserRole::Instructor => ApprovalProfile::Instructor {
            department_id,
            title: req
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        },
        UserRole::Parent | UserRole::Admin => ApprovalProfile::None,
    };

    let approved = storage
        .approve_account(user_id, admin.id, profile)
        .await
        .or_respond(ErrorCode::AccountStateInvalid)?;
    forget_user(request, user_id).await;
    tracing::info!("Account {} approved by {}", approved.username, admin.username);

    let detail = user_detail(&storage, approved).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Account approved")))
}

/// 驳回、停用或恢复账号
pub async fn change_status(
    service: &AccountService,
    user_id: i64,
    action: AccountAction,
    request: &HttpRequest,
) -> Reply {
    let actor = current_user(request)?;
    if actor.id == user_id {
        return Err(bad_request(
            ErrorCode::AccountStateInvalid,
            "You cannot change the status of your own account",
        ));
    }

    let storage = service.get_storage(request);
    let user = storage
        .get_user_by_id(user_id)
        .await
        .or_respond(ErrorCode::UserNotFound)?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;

    let target = action.apply(user.status).ok_or_else(|| {
        conflict(
            ErrorCode::AccountStateInvalid,
            format!("Cannot {action} an account in status '{}'", user.status),
        )
    })?;

    let updated = storage
        .set_user_status(user_id, user.status, target)
        .await
        .or_respond(ErrorCode::AccountStateInvalid)?;
    forget_user(request, user_id).await;
    tracing::info!(
        "Account {} changed from {} to {} by {}",
        updated.username,
        user.status,
        updated.status,
        actor.username
    );

    let message = match action {
        AccountAction::Approve => "Account approved",
        AccountAction::Reject => "Account rejected",
        AccountAction::Suspend => "Account suspended",
        AccountAction::Reactivate => "Account reactivated",
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse { user: updated }, message)))
}

async fn unique_student_number(storage: &Arc<dyn Storage>, year: i32) -> Result<String, HttpResponse> {
    let prefix = &AppConfig::get().academic.student_number_prefix;
    for _ in 0..STUDENT_NUMBER_ATTEMPTS {
        let candidate = generate_student_number(prefix, year);
        let taken = storage
            .student_number_exists(&candidate)
            .await
            .or_respond(ErrorCode::InternalServerError)?;
        if !taken {
            return Ok(candidate);
        }
    }

    tracing::error!("Could not allocate a student number after {STUDENT_NUMBER_ATTEMPTS} attempts");
    Err(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        "Failed to allocate a unique student number",
    )))
}
