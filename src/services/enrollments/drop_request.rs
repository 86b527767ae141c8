use actix_web::{HttpRequest, HttpResponse};

use super::{EnrollmentService, checked_note};
use crate::models::{
    ApiResponse, ErrorCode,
    attributes::EntityType,
    enrollments::{
        entities::{ATTR_DROP_REASON, EnrollmentAction},
        requests::DropRequest,
    },
};
use crate::services::{
    AttributeStore, OrRespond, Reply, access, current_user, forbidden, not_found,
};

/// 只有已批准的选课可以申请退课，退课同样需要导师审核
pub async fn request_drop(
    service: &EnrollmentService,
    enrollment_id: i64,
    req: DropRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let student = access::student_profile(&storage, &user).await?;

    let enrollment = storage
        .get_enrollment(enrollment_id)
        .await
        .or_respond(ErrorCode::EnrollmentNotFound)?
        .ok_or_else(|| not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found"))?;
    if enrollment.student_id != student.id {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "You can only drop your own enrollments",
        ));
    }

    let note = checked_note(ATTR_DROP_REASON, req.reason)?;
    let has_note = note.is_some();
    let updated = storage
        .transition_enrollment(enrollment_id, EnrollmentAction::RequestDrop, user.id, note)
        .await
        .or_respond(ErrorCode::EnrollmentStateInvalid)?;

    if has_note {
        AttributeStore::from_request(storage, request)
            .invalidate(EntityType::Enrollment, enrollment_id)
            .await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Drop request submitted",
    )))
}
