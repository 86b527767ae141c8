use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};

use super::AssignmentService;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
};
use crate::services::{
    OrRespond, Reply, access, bad_request, current_user, not_found, require_text,
};
use crate::storage::Storage;

pub(crate) async fn load_assignment(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
) -> Result<Assignment, HttpResponse> {
    storage
        .get_assignment(assignment_id)
        .await
        .or_respond(ErrorCode::AssignmentNotFound)?
        .ok_or_else(|| not_found(ErrorCode::AssignmentNotFound, "Assignment not found"))
}

fn check_max_points(max_points: f64) -> Result<(), HttpResponse> {
    if max_points > 0.0 && max_points.is_finite() {
        Ok(())
    } else {
        Err(bad_request(
            ErrorCode::AssignmentInvalid,
            "max_points must be greater than 0",
        ))
    }
}

pub async fn create_assignment(
    service: &AssignmentService,
    offered_course_id: i64,
    mut req: CreateAssignmentRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    access::offering_for_staff(&storage, offered_course_id, &user).await?;

    req.title = require_text(&req.title, ErrorCode::AssignmentInvalid, "title")?;
    check_max_points(req.max_points)?;
    if let Some(token) = &req.attachment_token {
        access::uploaded_file(&storage, token, ErrorCode::AssignmentInvalid).await?;
    }

    let assignment = storage
        .create_assignment(offered_course_id, req, user.id)
        .await
        .or_respond(ErrorCode::AssignmentInvalid)?;
    Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "Assignment created")))
}

pub async fn list_assignments(
    service: &AssignmentService,
    offered_course_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    access::course_member(&storage, offered_course_id, &user).await?;

    let assignments = storage
        .list_assignments(offered_course_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignments,
        "Assignments retrieved successfully",
    )))
}

pub async fn get_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let assignment = load_assignment(&storage, assignment_id).await?;
    access::course_member(&storage, assignment.offered_course_id, &user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignment,
        "Assignment retrieved successfully",
    )))
}

pub async fn update_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    mut req: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let assignment = load_assignment(&storage, assignment_id).await?;
    access::offering_for_staff(&storage, assignment.offered_course_id, &user).await?;

    if let Some(title) = &req.title {
        req.title = Some(require_text(title, ErrorCode::AssignmentInvalid, "title")?);
    }
    if let Some(max_points) = req.max_points {
        check_max_points(max_points)?;
    }
    if let Some(token) = &req.attachment_token {
        access::uploaded_file(&storage, token, ErrorCode::AssignmentInvalid).await?;
    }

    let updated = storage
        .update_assignment(assignment_id, req)
        .await
        .or_respond(ErrorCode::AssignmentInvalid)?
        .ok_or_else(|| not_found(ErrorCode::AssignmentNotFound, "Assignment not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Assignment updated")))
}

pub async fn delete_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let assignment = load_assignment(&storage, assignment_id).await?;
    access::offering_for_staff(&storage, assignment.offered_course_id, &user).await?;

    storage
        .delete_assignment(assignment_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted")))
}
