use actix_web::{HttpRequest, HttpResponse};

use super::AccountService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        requests::{NewUser, RegisterRequest},
        responses::UserResponse,
    },
};
use crate::services::{OrRespond, Reply, bad_request, conflict};
use crate::utils::validate::{validate_email, validate_full_name, validate_phone, validate_username};

/// 自助注册，账号进入待审核状态
pub async fn register(service: &AccountService, req: RegisterRequest, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);
    let new_user = NewUser::from(req);

    validate_username(&new_user.username)
        .map_err(|msg| bad_request(ErrorCode::UserNameInvalid, msg))?;
    validate_email(&new_user.email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    validate_full_name(&new_user.full_name).map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;
    if let Some(phone) = &new_user.phone {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;
    }
    if !new_user.role.can_self_register() {
        return Err(bad_request(
            ErrorCode::UserRoleInvalid,
            format!("Role '{}' cannot self-register", new_user.role),
        ));
    }

    if let Some(department_id) = new_user.department_id {
        storage
            .get_department(department_id)
            .await
            .or_respond(ErrorCode::DepartmentNotFound)?
            .ok_or_else(|| bad_request(ErrorCode::DepartmentNotFound, "Department not found"))?;
    }

    let username_taken = storage
        .get_user_by_username(&new_user.username)
        .await
        .or_respond(ErrorCode::UserAlreadyExists)?
        .is_some();
    if username_taken {
        return Err(conflict(ErrorCode::UserAlreadyExists, "Username already exists"));
    }
    let email_taken = storage
        .get_user_by_email(&new_user.email)
        .await
        .or_respond(ErrorCode::UserAlreadyExists)?
        .is_some();
    if email_taken {
        return Err(conflict(ErrorCode::UserAlreadyExists, "Email already exists"));
    }

    let user = storage
        .create_user(new_user)
        .await
        .or_respond(ErrorCode::UserAlreadyExists)?;
    tracing::info!(
        "Account {} registered as {}, awaiting approval",
        user.username,
        user.role
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        UserResponse { user },
        "Registration submitted, awaiting approval",
    )))
}
