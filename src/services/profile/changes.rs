//! 邮箱、姓名、电话的修改需要管理员审核，每个字段同时只能有一条待审申请

use actix_web::{HttpRequest, HttpResponse};

use super::ProfileService;
use crate::models::{
    ApiResponse, ErrorCode,
    common::PaginationQuery,
    profile::{
        entities::{ProfileChangeStatus, ProfileField},
        requests::ProfileChangeRequest,
    },
    users::entities::User,
};
use crate::services::{
    OrRespond, Reply, bad_request, conflict, current_user, forget_user, not_found,
};
use crate::utils::validate::{validate_email, validate_full_name, validate_phone};

/// 校验并归一化新值
fn normalize_value(field: ProfileField, raw: &str) -> Result<String, &'static str> {
    let value = raw.trim();
    match field {
        ProfileField::Email => {
            let email = value.to_lowercase();
            validate_email(&email)?;
            Ok(email)
        }
        ProfileField::FullName => {
            validate_full_name(value)?;
            Ok(value.to_string())
        }
        ProfileField::Phone => {
            validate_phone(value)?;
            Ok(value.to_string())
        }
    }
}

fn current_value(user: &User, field: ProfileField) -> Option<String> {
    match field {
        ProfileField::Email => Some(user.email.clone()),
        ProfileField::FullName => Some(user.full_name.clone()),
        ProfileField::Phone => user.phone.clone(),
    }
}

pub async fn request_change(
    service: &ProfileService,
    req: ProfileChangeRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let new_value = normalize_value(req.field, &req.new_value)
        .map_err(|msg| bad_request(ErrorCode::ProfileChangeInvalid, msg))?;
    let old_value = current_value(&user, req.field);
    if old_value.as_deref() == Some(new_value.as_str()) {
        return Err(bad_request(
            ErrorCode::ProfileChangeInvalid,
            format!("New {} is the same as the current one", req.field.as_str()),
        ));
    }

    let pending = storage
        .has_pending_profile_change(user.id, req.field)
        .await
        .or_respond(ErrorCode::ProfileChangePending)?;
    if pending {
        return Err(conflict(
            ErrorCode::ProfileChangePending,
            format!(
                "A change to {} is already awaiting review",
                req.field.as_str()
            ),
        ));
    }

    let change = storage
        .create_profile_change(user.id, req.field, old_value, new_value)
        .await
        .or_respond(ErrorCode::ProfileChangeInvalid)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        change,
        "Profile change submitted for review",
    )))
}

pub async fn list_my_changes(
    service: &ProfileService,
    query: PaginationQuery,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let (page, size) = query.normalized();

    let changes = storage
        .list_profile_changes(Some(user.id), None, page, size)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        changes,
        "Profile changes retrieved successfully",
    )))
}

pub async fn list_pending_changes(
    service: &ProfileService,
    query: PaginationQuery,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let (page, size) = query.normalized();

    let changes = storage
        .list_profile_changes(None, Some(ProfileChangeStatus::Pending), page, size)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        changes,
        "Pending profile changes retrieved successfully",
    )))
}

/// 通过时把新值写回用户
pub async fn review_change(
    service: &ProfileService,
    change_id: i64,
    approve: bool,
    request: &HttpRequest,
) -> Reply {
    let reviewer = current_user(request)?;
    let storage = service.get_storage(request);

    let change = storage
        .get_profile_change(change_id)
        .await
        .or_respond(ErrorCode::ProfileChangeNotFound)?
        .ok_or_else(|| not_found(ErrorCode::ProfileChangeNotFound, "Profile change not found"))?;

    if approve && change.field == ProfileField::Email {
        let owner = storage
            .get_user_by_email(&change.new_value)
            .await
            .or_respond(ErrorCode::UserAlreadyExists)?;
        if owner.is_some_and(|u| u.id != change.user_id) {
            return Err(conflict(
                ErrorCode::UserAlreadyExists,
                "Email is already used by another account",
            ));
        }
    }

    let reviewed = storage
        .review_profile_change(change_id, approve, reviewer.id)
        .await
        .or_respond(ErrorCode::ProfileChangeNotFound)?;
    if approve {
        forget_user(request, reviewed.user_id).await;
    }

    let message = if approve {
        "Profile change approved"
    } else {
        "Profile change rejected"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(reviewed, message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases() {
        assert_eq!(
            normalize_value(ProfileField::Email, "  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
        assert!(normalize_value(ProfileField::Email, "not-an-email").is_err());
    }

    #[test]
    fn test_normalize_rejects_blank_name() {
        assert!(normalize_value(ProfileField::FullName, "   ").is_err());
        assert!(normalize_value(ProfileField::Phone, "+1 555 0100").is_ok());
    }
}
