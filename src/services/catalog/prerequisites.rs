//! 先修关系构成有向无环图，新增边前检查是否成环

use actix_web::{HttpRequest, HttpResponse};

use super::CatalogService;
use crate::models::{ApiResponse, ErrorCode, catalog::requests::AddPrerequisiteRequest};
use crate::services::{OrRespond, Reply, bad_request, conflict, not_found};
use crate::utils::prerequisite_graph::PrerequisiteGraph;

pub async fn list_prerequisites(
    service: &CatalogService,
    course_id: i64,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    storage
        .get_course(course_id)
        .await
        .or_respond(ErrorCode::CourseNotFound)?
        .ok_or_else(|| not_found(ErrorCode::CourseNotFound, "Course not found"))?;
    let prerequisites = storage
        .list_prerequisites(course_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        prerequisites,
        "Prerequisites retrieved successfully",
    )))
}

pub async fn add_prerequisite(
    service: &CatalogService,
    course_id: i64,
    req: AddPrerequisiteRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let prerequisite_id = req.prerequisite_id;

    if course_id == prerequisite_id {
        return Err(bad_request(
            ErrorCode::PrerequisiteInvalid,
            "A course cannot be its own prerequisite",
        ));
    }

    for id in [course_id, prerequisite_id] {
        storage
            .get_course(id)
            .await
            .or_respond(ErrorCode::CourseNotFound)?
            .ok_or_else(|| not_found(ErrorCode::CourseNotFound, format!("Course {id} not found")))?;
    }

    let edges = storage
        .list_prerequisite_edges()
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    let graph = PrerequisiteGraph::from_edges(&edges);
    if graph.contains_edge(course_id, prerequisite_id) {
        return Err(conflict(
            ErrorCode::PrerequisiteExists,
            "Prerequisite already exists",
        ));
    }
    if graph.would_create_cycle(course_id, prerequisite_id) {
        return Err(conflict(
            ErrorCode::PrerequisiteCycle,
            "Adding this prerequisite would create a cycle",
        ));
    }

    let edge = storage
        .add_prerequisite(course_id, prerequisite_id)
        .await
        .or_respond(ErrorCode::PrerequisiteExists)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(edge, "Prerequisite added")))
}

pub async fn remove_prerequisite(
    service: &CatalogService,
    course_id: i64,
    prerequisite_id: i64,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let removed = storage
        .remove_prerequisite(course_id, prerequisite_id)
        .await
        .or_respond(ErrorCode::PrerequisiteInvalid)?;
    if !removed {
        return Err(not_found(ErrorCode::NotFound, "Prerequisite not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Prerequisite removed")))
}
