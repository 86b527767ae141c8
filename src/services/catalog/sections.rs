use actix_web::{HttpRequest, HttpResponse};

use super::CatalogService;
use crate::models::{ApiResponse, ErrorCode, catalog::requests::CreateSectionRequest};
use crate::services::{OrRespond, Reply, access, bad_request, not_found, require_text};

pub async fn create_section(
    service: &CatalogService,
    offered_course_id: i64,
    req: CreateSectionRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    access::offered_course(&storage, offered_course_id).await?;

    let section_number = require_text(&req.section_number, ErrorCode::SectionInvalid, "section_number")?;
    if req.capacity <= 0 {
        return Err(bad_request(ErrorCode::SectionInvalid, "Capacity must be positive"));
    }
    if let Some(instructor_id) = req.instructor_id {
        storage
            .get_instructor_by_id(instructor_id)
            .await
            .or_respond(ErrorCode::InstructorProfileNotFound)?
            .ok_or_else(|| bad_request(ErrorCode::SectionInvalid, "Instructor not found"))?;
    }
    if let Some(room_id) = req.room_id {
        storage
            .get_room(room_id)
            .await
            .or_respond(ErrorCode::RoomNotFound)?
            .ok_or_else(|| bad_request(ErrorCode::SectionInvalid, "Room not found"))?;
    }

    let section = storage
        .create_section(
            offered_course_id,
            CreateSectionRequest {
                section_number,
                ..req
            },
        )
        .await
        .or_respond(ErrorCode::SectionInvalid)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        section,
        "Section created successfully",
    )))
}

pub async fn list_sections(
    service: &CatalogService,
    offered_course_id: i64,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    access::offered_course(&storage, offered_course_id).await?;

    let sections = storage
        .list_sections(offered_course_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        sections,
        "Sections retrieved successfully",
    )))
}

pub async fn delete_section(service: &CatalogService, id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let deleted = storage
        .delete_section(id)
        .await
        .or_respond(ErrorCode::SectionNotFound)?;
    if !deleted {
        return Err(not_found(ErrorCode::SectionNotFound, "Section not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Section deleted successfully")))
}
