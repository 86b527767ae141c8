use actix_web::{HttpRequest, HttpResponse};

use super::{
    GradingService,
    scores::{configured_components, ensure_gradable, load_enrollment},
};
use crate::models::{
    ApiResponse, ErrorCode,
    attributes::EntityType,
    grades::entities::{LetterGrade, scores_from_attributes, weighted_total},
};
use crate::services::{AttributeStore, OrRespond, Reply, access, current_user};

/// 按当前分项成绩计算总评并写入，缺失的分项按 0 分计；可重复执行覆盖旧值
pub async fn finalize(service: &GradingService, enrollment_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let enrollment = load_enrollment(&storage, enrollment_id).await?;
    access::offering_for_staff(&storage, enrollment.offered_course_id, &user).await?;
    ensure_gradable(&enrollment)?;

    let attributes = AttributeStore::from_request(storage.clone(), request);
    let components = configured_components(&attributes, enrollment.offered_course_id).await?;
    let scores = scores_from_attributes(
        &attributes
            .map(EntityType::Enrollment, enrollment_id)
            .await
            .or_respond(ErrorCode::InternalServerError)?,
    );

    let total = weighted_total(&components, &scores);
    let letter = LetterGrade::from_total(total);
    let grade = storage
        .upsert_grade(enrollment_id, total, letter, user.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    tracing::info!(
        "Enrollment {} finalized at {} ({}) by {}",
        enrollment_id,
        total,
        letter,
        user.username
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade finalized")))
}
