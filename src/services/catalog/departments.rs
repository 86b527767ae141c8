use actix_web::{HttpRequest, HttpResponse};

use super::CatalogService;
use crate::models::{
    ApiResponse, ErrorCode,
    catalog::requests::{CreateDepartmentRequest, UpdateDepartmentRequest},
};
use crate::services::{OrRespond, Reply, conflict, not_found, require_text};

pub async fn create_department(
    service: &CatalogService,
    req: CreateDepartmentRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let code = require_text(&req.code, ErrorCode::BadRequest, "code")?.to_uppercase();
    let name = require_text(&req.name, ErrorCode::BadRequest, "name")?;

    let exists = storage
        .get_department_by_code(&code)
        .await
        .or_respond(ErrorCode::DepartmentCodeExists)?
        .is_some();
    if exists {
        return Err(conflict(
            ErrorCode::DepartmentCodeExists,
            format!("Department code '{code}' already exists"),
        ));
    }

    let department = storage
        .create_department(CreateDepartmentRequest {
            code,
            name,
            description: req.description,
        })
        .await
        .or_respond(ErrorCode::DepartmentCodeExists)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        department,
        "Department created successfully",
    )))
}

pub async fn list_departments(service: &CatalogService, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let departments = storage
        .list_departments()
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        departments,
        "Departments retrieved successfully",
    )))
}

pub async fn get_department(service: &CatalogService, id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    match storage.get_department(id).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department retrieved successfully",
        ))),
        Ok(None) => Err(not_found(ErrorCode::DepartmentNotFound, "Department not found")),
        Err(e) => Err(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("Failed to get department: {e}"),
        ))),
    }
}

pub async fn update_department(
    service: &CatalogService,
    id: i64,
    req: UpdateDepartmentRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let name = match &req.name {
        Some(name) => Some(require_text(name, ErrorCode::BadRequest, "name")?),
        None => None,
    };

    let department = storage
        .update_department(
            id,
            UpdateDepartmentRequest {
                name,
                description: req.description,
            },
        )
        .await
        .or_respond(ErrorCode::DepartmentNotFound)?
        .ok_or_else(|| not_found(ErrorCode::DepartmentNotFound, "Department not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        department,
        "Department updated successfully",
    )))
}

/// 仍有课程的院系不能删除
pub async fn delete_department(service: &CatalogService, id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let courses = storage
        .count_courses_in_department(id)
        .await
        .or_respond(ErrorCode::DepartmentNotFound)?;
    if courses > 0 {
        return Err(conflict(
            ErrorCode::Conflict,
            format!("Department still has {courses} course(s)"),
        ));
    }

    let deleted = storage
        .delete_department(id)
        .await
        .or_respond(ErrorCode::DepartmentNotFound)?;
    if !deleted {
        return Err(not_found(ErrorCode::DepartmentNotFound, "Department not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Department deleted successfully",
    )))
}
