use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::{AssignmentService, manage::load_assignment};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::requests::{GradeSubmissionRequest, SubmitAssignmentRequest},
};
use crate::services::{
    OrRespond, Reply, access, bad_request, conflict, current_user, error_response, not_found,
};

/// 截止后仍可提交，但会被标记为迟交；已评分的提交不可再覆盖
pub async fn submit(
    service: &AssignmentService,
    assignment_id: i64,
    req: SubmitAssignmentRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let assignment = load_assignment(&storage, assignment_id).await?;
    let student = access::student_profile(&storage, &user).await?;
    access::enrolled_in(&storage, student.id, assignment.offered_course_id).await?;

    let content = req
        .content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if content.is_none() && req.file_token.is_none() {
        return Err(bad_request(
            ErrorCode::SubmissionInvalid,
            "Submission needs content or a file",
        ));
    }
    if let Some(token) = &req.file_token {
        access::uploaded_file(&storage, token, ErrorCode::SubmissionInvalid).await?;
    }

    let is_late = assignment.is_late_at(chrono::Utc::now());
    let submission = storage
        .upsert_submission(assignment_id, student.id, content, req.file_token, is_late)
        .await
        .map_err(|e| error_response(&e, ErrorCode::SubmissionAlreadyGraded))?;

    info!(
        "Student {} submitted assignment {}{}",
        student.id,
        assignment_id,
        if is_late { " (late)" } else { "" }
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(submission, "Submission saved")))
}

pub async fn my_submission(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    load_assignment(&storage, assignment_id).await?;
    let student = access::student_profile(&storage, &user).await?;

    let submission = storage
        .find_submission(assignment_id, student.id)
        .await
        .or_respond(ErrorCode::SubmissionNotFound)?
        .ok_or_else(|| not_found(ErrorCode::SubmissionNotFound, "No submission yet"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submission,
        "Submission retrieved successfully",
    )))
}

pub async fn list_submissions(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let assignment = load_assignment(&storage, assignment_id).await?;
    access::offering_for_staff(&storage, assignment.offered_course_id, &user).await?;

    let submissions = storage
        .list_submissions(assignment_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submissions,
        "Submissions retrieved successfully",
    )))
}

/// 重新评分会覆盖原分数与评语
pub async fn grade_submission(
    service: &AssignmentService,
    submission_id: i64,
    req: GradeSubmissionRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let submission = storage
        .get_submission(submission_id)
        .await
        .or_respond(ErrorCode::SubmissionNotFound)?
        .ok_or_else(|| not_found(ErrorCode::SubmissionNotFound, "Submission not found"))?;
    let assignment = load_assignment(&storage, submission.assignment_id).await?;
    access::offering_for_staff(&storage, assignment.offered_course_id, &user).await?;

    if !(0.0..=assignment.max_points).contains(&req.score) {
        return Err(bad_request(
            ErrorCode::GradeScoreInvalid,
            format!("Score must be between 0 and {}", assignment.max_points),
        ));
    }

    let feedback = req
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());
    let graded = storage
        .grade_submission(submission_id, req.score, feedback, user.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?
        .ok_or_else(|| conflict(ErrorCode::SubmissionNotFound, "Submission disappeared"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(graded, "Submission graded")))
}
