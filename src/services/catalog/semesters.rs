use actix_web::{HttpRequest, HttpResponse};

use super::CatalogService;
use crate::models::{ApiResponse, ErrorCode, catalog::requests::CreateSemesterRequest};
use crate::services::{OrRespond, Reply, bad_request, not_found, require_text};

pub async fn create_semester(
    service: &CatalogService,
    req: CreateSemesterRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let name = require_text(&req.name, ErrorCode::SemesterInvalid, "name")?;
    if req.start_date >= req.end_date {
        return Err(bad_request(
            ErrorCode::SemesterInvalid,
            "Semester start date must be before its end date",
        ));
    }

    let semester = storage
        .create_semester(CreateSemesterRequest { name, ..req })
        .await
        .or_respond(ErrorCode::SemesterInvalid)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        semester,
        "Semester created successfully",
    )))
}

pub async fn list_semesters(service: &CatalogService, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let semesters = storage
        .list_semesters()
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        semesters,
        "Semesters retrieved successfully",
    )))
}

/// 激活一个学期，其余学期自动取消激活
pub async fn activate_semester(service: &CatalogService, id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let semester = storage
        .activate_semester(id)
        .await
        .or_respond(ErrorCode::SemesterNotFound)?
        .ok_or_else(|| not_found(ErrorCode::SemesterNotFound, "Semester not found"))?;

    tracing::info!("Semester {} is now active", semester.name);
    Ok(HttpResponse::Ok().json(ApiResponse::success(semester, "Semester activated")))
}
