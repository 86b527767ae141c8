//! 导师审核：选课申请与退课申请都由学生的导师（或管理员）处理

use actix_web::{HttpRequest, HttpResponse};

use super::{EnrollmentService, checked_note, details::enrollment_details};
use crate::models::{
    ApiResponse, ErrorCode,
    attributes::EntityType,
    enrollments::{
        entities::{ATTR_REVIEW_NOTE, EnrollmentAction},
        requests::ReviewRequest,
    },
};
use crate::errors::LmsError;
use crate::services::{
    AttributeStore, OrRespond, Reply, access, conflict, current_user, error_response, forbidden,
    not_found,
};

/// 当前导师名下学生的待审申请
pub async fn list_advising_requests(service: &EnrollmentService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let instructor = access::instructor_profile(&storage, &user).await?;

    let student_ids: Vec<i64> = storage
        .list_students_by_advisor(instructor.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?
        .into_iter()
        .map(|s| s.id)
        .collect();
    let waiting = storage
        .list_enrollments_awaiting_review(&student_ids)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    let attributes = AttributeStore::from_request(storage.clone(), request);
    let items = enrollment_details(&storage, &attributes, waiting).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        items,
        "Advising requests retrieved successfully",
    )))
}

pub async fn review(
    service: &EnrollmentService,
    enrollment_id: i64,
    approve: bool,
    req: ReviewRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let enrollment = storage
        .get_enrollment(enrollment_id)
        .await
        .or_respond(ErrorCode::EnrollmentNotFound)?
        .ok_or_else(|| not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found"))?;

    if !user.is_admin() {
        let instructor = access::instructor_profile(&storage, &user).await?;
        let student = storage
            .get_student_by_id(enrollment.student_id)
            .await
            .or_respond(ErrorCode::StudentProfileNotFound)?
            .ok_or_else(|| not_found(ErrorCode::StudentProfileNotFound, "Student not found"))?;
        if student.advisor_id != Some(instructor.id) {
            return Err(forbidden(
                ErrorCode::EnrollmentNotAdvisor,
                "Only the student's advisor can review this enrollment",
            ));
        }
    }

    let action = if approve {
        EnrollmentAction::Approve
    } else {
        EnrollmentAction::Reject
    };
    let note = checked_note(ATTR_REVIEW_NOTE, req.note)?;
    let has_note = note.is_some();
    let updated = match storage
        .transition_enrollment(enrollment_id, action, user.id, note)
        .await
    {
        Ok(updated) => updated,
        Err(LmsError::Conflict(msg)) => {
            return Err(conflict(ErrorCode::EnrollmentCourseFull, msg));
        }
        Err(e) => return Err(error_response(&e, ErrorCode::EnrollmentStateInvalid)),
    };

    if has_note {
        AttributeStore::from_request(storage, request)
            .invalidate(EntityType::Enrollment, enrollment_id)
            .await;
    }

    tracing::info!(
        "Enrollment {} moved from {} to {} by {}",
        enrollment_id,
        enrollment.status,
        updated.status,
        user.username
    );
    let message = if approve {
        "Enrollment request approved"
    } else {
        "Enrollment request rejected"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, message)))
}
