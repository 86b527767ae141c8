use actix_web::{HttpRequest, HttpResponse};

use super::{
    GradingService,
    scores::{grade_view, load_enrollment},
};
use crate::models::{ApiResponse, ErrorCode, grades::responses::TranscriptResponse};
use crate::services::{AttributeStore, OrRespond, Reply, access, current_user};

/// 学生查看本人某门课的成绩明细；授课教师与管理员也可查看
pub async fn enrollment_grade(
    service: &GradingService,
    enrollment_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let enrollment = load_enrollment(&storage, enrollment_id).await?;

    let own = match storage
        .get_student_by_user_id(user.id)
        .await
        .or_respond(ErrorCode::StudentProfileNotFound)?
    {
        Some(student) => student.id == enrollment.student_id,
        None => false,
    };
    if !own {
        access::offering_for_staff(&storage, enrollment.offered_course_id, &user).await?;
    }

    let attributes = AttributeStore::from_request(storage.clone(), request);
    let view = grade_view(&storage, &attributes, &enrollment).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        view,
        "Grade retrieved successfully",
    )))
}

pub async fn my_transcript(service: &GradingService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let student = access::student_profile(&storage, &user).await?;

    let entries = storage
        .list_transcript(student.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TranscriptResponse::from_entries(student.id, entries),
        "Transcript retrieved successfully",
    )))
}
