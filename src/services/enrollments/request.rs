//! 选课申请
//!
//! 依次检查：选课开放、学生档案、开课与教学班、重复申请、先修课程、学分上限、容量。

use actix_web::{HttpRequest, HttpResponse};

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode, enrollments::requests::EnrollRequest};
use crate::services::{
    OrRespond, Reply, access, bad_request, conflict, current_user, not_found,
    system::DynamicConfig,
};

pub async fn request_enrollment(
    service: &EnrollmentService,
    req: EnrollRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    if !DynamicConfig::enrollment_open().await {
        return Err(conflict(
            ErrorCode::EnrollmentClosed,
            "Course registration is currently closed",
        ));
    }

    let student = access::student_profile(&storage, &user).await?;
    let offering = access::offered_course(&storage, req.offered_course_id).await?;

    if let Some(section_id) = req.section_id {
        let section = storage
            .get_section(section_id)
            .await
            .or_respond(ErrorCode::SectionNotFound)?
            .ok_or_else(|| not_found(ErrorCode::SectionNotFound, "Section not found"))?;
        if section.offered_course_id != offering.id {
            return Err(bad_request(
                ErrorCode::SectionInvalid,
                "Section does not belong to this offered course",
            ));
        }
    }

    let duplicate = storage
        .find_active_enrollment(student.id, offering.id)
        .await
        .or_respond(ErrorCode::EnrollmentDuplicate)?
        .is_some();
    if duplicate {
        return Err(conflict(
            ErrorCode::EnrollmentDuplicate,
            "You already have an active enrollment in this course",
        ));
    }

    let course = storage
        .get_course(offering.course_id)
        .await
        .or_respond(ErrorCode::CourseNotFound)?
        .ok_or_else(|| not_found(ErrorCode::CourseNotFound, "Course not found"))?;

    let prerequisites = storage
        .list_prerequisites(course.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    if !prerequisites.is_empty() {
        let passed = storage
            .passed_course_ids(student.id)
            .await
            .or_respond(ErrorCode::InternalServerError)?;
        let missing: Vec<&str> = prerequisites
            .iter()
            .filter(|p| !passed.contains(&p.id))
            .map(|p| p.code.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(conflict(
                ErrorCode::EnrollmentPrerequisiteMissing,
                format!("Missing prerequisites: {}", missing.join(", ")),
            ));
        }
    }

    let max_credits = DynamicConfig::max_credits().await;
    let current_credits = storage
        .active_credits_in_semester(student.id, offering.semester_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    if current_credits + course.credits as i64 > max_credits {
        return Err(conflict(
            ErrorCode::EnrollmentCreditLimit,
            format!(
                "Enrolling would bring you to {} credits, the limit is {max_credits}",
                current_credits + course.credits as i64
            ),
        ));
    }

    if offering.is_full() {
        return Err(conflict(
            ErrorCode::EnrollmentCourseFull,
            "This course has no remaining seats",
        ));
    }

    let enrollment = storage
        .create_enrollment(student.id, offering.id, req.section_id)
        .await
        .or_respond(ErrorCode::EnrollmentDuplicate)?;
    tracing::info!(
        "Student {} requested enrollment {} in offered course {}",
        student.student_number,
        enrollment.id,
        offering.id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        enrollment,
        "Enrollment request submitted",
    )))
}
