use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};

use super::CatalogService;
use crate::models::{
    ApiResponse, ErrorCode,
    catalog::{
        entities::{MAX_CREDITS, MIN_CREDITS},
        requests::{CourseListParams, CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseDetailResponse,
    },
};
use crate::services::{OrRespond, Reply, bad_request, conflict, not_found, require_text};
use crate::storage::Storage;

fn check_credits(credits: i32) -> Result<(), HttpResponse> {
    if (MIN_CREDITS..=MAX_CREDITS).contains(&credits) {
        Ok(())
    } else {
        Err(bad_request(
            ErrorCode::CourseInvalid,
            format!("Credits must be between {MIN_CREDITS} and {MAX_CREDITS}"),
        ))
    }
}

async fn check_department(storage: &Arc<dyn Storage>, department_id: i64) -> Result<(), HttpResponse> {
    storage
        .get_department(department_id)
        .await
        .or_respond(ErrorCode::DepartmentNotFound)?
        .map(|_| ())
        .ok_or_else(|| bad_request(ErrorCode::DepartmentNotFound, "Department not found"))
}

pub async fn create_course(
    service: &CatalogService,
    req: CreateCourseRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let code = require_text(&req.code, ErrorCode::CourseInvalid, "code")?.to_uppercase();
    let title = require_text(&req.title, ErrorCode::CourseInvalid, "title")?;
    check_credits(req.credits)?;
    check_department(&storage, req.department_id).await?;

    let exists = storage
        .get_course_by_code(&code)
        .await
        .or_respond(ErrorCode::CourseCodeExists)?
        .is_some();
    if exists {
        return Err(conflict(
            ErrorCode::CourseCodeExists,
            format!("Course code '{code}' already exists"),
        ));
    }

    let course = storage
        .create_course(CreateCourseRequest {
            code,
            title,
            ..req
        })
        .await
        .or_respond(ErrorCode::CourseCodeExists)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        course,
        "Course created successfully",
    )))
}

pub async fn list_courses(
    service: &CatalogService,
    query: CourseListParams,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let list_query = CourseListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        department_id: query.department_id,
        search: query.search,
    };

    let response = storage
        .list_courses(list_query)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Courses retrieved successfully",
    )))
}

/// 课程详情附带直接先修课程
pub async fn get_course(service: &CatalogService, id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let course = storage
        .get_course(id)
        .await
        .or_respond(ErrorCode::CourseNotFound)?
        .ok_or_else(|| not_found(ErrorCode::CourseNotFound, "Course not found"))?;
    let prerequisites = storage
        .list_prerequisites(id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseDetailResponse {
            course,
            prerequisites,
        },
        "Course retrieved successfully",
    )))
}

pub async fn update_course(
    service: &CatalogService,
    id: i64,
    req: UpdateCourseRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let title = match &req.title {
        Some(title) => Some(require_text(title, ErrorCode::CourseInvalid, "title")?),
        None => None,
    };
    if let Some(credits) = req.credits {
        check_credits(credits)?;
    }
    if let Some(department_id) = req.department_id {
        check_department(&storage, department_id).await?;
    }

    let course = storage
        .update_course(id, UpdateCourseRequest { title, ..req })
        .await
        .or_respond(ErrorCode::CourseNotFound)?
        .ok_or_else(|| not_found(ErrorCode::CourseNotFound, "Course not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        course,
        "Course updated successfully",
    )))
}

/// 已开课的课程不能删除
pub async fn delete_course(service: &CatalogService, id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let offerings = storage
        .count_offerings_of_course(id)
        .await
        .or_respond(ErrorCode::CourseNotFound)?;
    if offerings > 0 {
        return Err(conflict(
            ErrorCode::Conflict,
            format!("Course has been offered {offerings} time(s) and cannot be deleted"),
        ));
    }

    let deleted = storage
        .delete_course(id)
        .await
        .or_respond(ErrorCode::CourseNotFound)?;
    if !deleted {
        return Err(not_found(ErrorCode::CourseNotFound, "Course not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
}
