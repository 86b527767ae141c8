use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};

use super::GradingService;
use crate::models::{
    ApiResponse, ErrorCode,
    attributes::{AttributeValue, EntityType},
    enrollments::entities::{Enrollment, EnrollmentStatus},
    grades::{
        entities::{
            GradeComponent, SCORE_PREFIX, components_from_attributes, scores_from_attributes,
            weighted_total,
        },
        requests::RecordScoreRequest,
        responses::{ComponentScore, EnrollmentGradeResponse},
    },
};
use crate::services::{
    AttributeStore, OrRespond, Reply, access, bad_request, conflict, current_user, not_found,
};
use crate::storage::Storage;

pub(crate) async fn load_enrollment(
    storage: &Arc<dyn Storage>,
    enrollment_id: i64,
) -> Result<Enrollment, HttpResponse> {
    storage
        .get_enrollment(enrollment_id)
        .await
        .or_respond(ErrorCode::EnrollmentNotFound)?
        .ok_or_else(|| not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found"))
}

/// 仍在课上的选课才能记分
pub(crate) fn ensure_gradable(enrollment: &Enrollment) -> Result<(), HttpResponse> {
    match enrollment.status {
        EnrollmentStatus::Approved | EnrollmentStatus::DropPending => Ok(()),
        other => Err(conflict(
            ErrorCode::EnrollmentStateInvalid,
            format!("Cannot grade an enrollment in status '{other}'"),
        )),
    }
}

/// 开课的成绩组成，未配置时报错
pub(crate) async fn configured_components(
    attributes: &AttributeStore,
    offered_course_id: i64,
) -> Result<Vec<GradeComponent>, HttpResponse> {
    let map = attributes
        .map(EntityType::OfferedCourse, offered_course_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    let components = components_from_attributes(&map);
    if components.is_empty() {
        return Err(conflict(
            ErrorCode::GradeComponentsMissing,
            "Grade components have not been configured for this course",
        ));
    }
    Ok(components)
}

/// 分项成绩、当前加权总分与已出的总评
pub(crate) async fn grade_view(
    storage: &Arc<dyn Storage>,
    attributes: &AttributeStore,
    enrollment: &Enrollment,
) -> Result<EnrollmentGradeResponse, HttpResponse> {
    let course_attrs = attributes
        .map(EntityType::OfferedCourse, enrollment.offered_course_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    let components = components_from_attributes(&course_attrs);

    let enrollment_attrs = attributes
        .map(EntityType::Enrollment, enrollment.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    let scores = scores_from_attributes(&enrollment_attrs);

    let grade = storage
        .get_grade_by_enrollment(enrollment.id)
        .await
        .or_respond(ErrorCode::GradeNotFound)?;

    Ok(EnrollmentGradeResponse {
        enrollment_id: enrollment.id,
        current_total: weighted_total(&components, &scores),
        components: components
            .iter()
            .map(|c| ComponentScore {
                name: c.name.clone(),
                weight: c.weight,
                score: scores.get(&c.name).copied(),
            })
            .collect(),
        grade,
    })
}

pub async fn record_score(
    service: &GradingService,
    enrollment_id: i64,
    req: RecordScoreRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let enrollment = load_enrollment(&storage, enrollment_id).await?;
    access::offering_for_staff(&storage, enrollment.offered_course_id, &user).await?;
    ensure_gradable(&enrollment)?;

    let attributes = AttributeStore::from_request(storage.clone(), request);
    let components = configured_components(&attributes, enrollment.offered_course_id).await?;
    if !components.iter().any(|c| c.name == req.component) {
        return Err(bad_request(
            ErrorCode::GradeScoreInvalid,
            format!("Unknown grade component '{}'", req.component),
        ));
    }
    if !(0.0..=100.0).contains(&req.score) {
        return Err(bad_request(
            ErrorCode::GradeScoreInvalid,
            "Score must be between 0 and 100",
        ));
    }

    attributes
        .set(
            EntityType::Enrollment,
            enrollment_id,
            &format!("{SCORE_PREFIX}{}", req.component),
            AttributeValue::Decimal(req.score),
        )
        .await
        .or_respond(ErrorCode::GradeScoreInvalid)?;

    let view = grade_view(&storage, &attributes, &enrollment).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view, "Score recorded")))
}
