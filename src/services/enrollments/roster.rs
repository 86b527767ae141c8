use actix_web::{HttpRequest, HttpResponse};

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode, enrollments::responses::RosterResponse};
use crate::services::{OrRespond, Reply, access, current_user};

/// 已批准学生名单，仅授课教师与管理员可见
pub async fn roster(
    service: &EnrollmentService,
    offered_course_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    access::offering_for_staff(&storage, offered_course_id, &user).await?;

    let items = storage
        .list_roster(offered_course_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RosterResponse {
            offered_course_id,
            items,
        },
        "Roster retrieved successfully",
    )))
}
