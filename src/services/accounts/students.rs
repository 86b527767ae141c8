use actix_web::{HttpRequest, HttpResponse};

use super::AccountService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::UserRole,
        requests::{AssignAdvisorRequest, LinkParentRequest},
    },
};
use crate::services::{OrRespond, Reply, bad_request, conflict, not_found};

pub async fn assign_advisor(
    service: &AccountService,
    student_id: i64,
    req: AssignAdvisorRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    storage
        .get_instructor_by_id(req.instructor_id)
        .await
        .or_respond(ErrorCode::InstructorProfileNotFound)?
        .ok_or_else(|| not_found(ErrorCode::InstructorProfileNotFound, "Instructor not found"))?;

    let student = storage
        .set_student_advisor(student_id, req.instructor_id)
        .await
        .or_respond(ErrorCode::StudentProfileNotFound)?
        .ok_or_else(|| not_found(ErrorCode::StudentProfileNotFound, "Student not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Advisor assigned")))
}

/// 家长账号必须存在、角色为 parent 且已激活
pub async fn link_parent(
    service: &AccountService,
    student_id: i64,
    req: LinkParentRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let parent = storage
        .get_user_by_id(req.parent_user_id)
        .await
        .or_respond(ErrorCode::UserNotFound)?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "Parent user not found"))?;
    if parent.role != UserRole::Parent {
        return Err(bad_request(
            ErrorCode::UserRoleInvalid,
            "Linked account must have the parent role",
        ));
    }
    if !parent.is_active() {
        return Err(conflict(
            ErrorCode::AccountStateInvalid,
            "Parent account is not active",
        ));
    }

    let student = storage
        .set_student_parent(student_id, parent.id)
        .await
        .or_respond(ErrorCode::StudentProfileNotFound)?
        .ok_or_else(|| not_found(ErrorCode::StudentProfileNotFound, "Student not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Parent linked")))
}
