use actix_web::{HttpRequest, HttpResponse};

use super::{EnrollmentService, details::enrollment_details};
use crate::models::{
    ApiResponse, ErrorCode, PaginatedResponse, enrollments::requests::MyEnrollmentParams,
};
use crate::services::{AttributeStore, OrRespond, Reply, access, current_user};

pub async fn list_my_enrollments(
    service: &EnrollmentService,
    query: MyEnrollmentParams,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let student = access::student_profile(&storage, &user).await?;
    let (page, size) = query.pagination.normalized();

    let enrollments = storage
        .list_student_enrollments(student.id, query.semester_id, page, size)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    let attributes = AttributeStore::from_request(storage.clone(), request);
    let items = enrollment_details(&storage, &attributes, enrollments.items).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PaginatedResponse {
            items,
            pagination: enrollments.pagination,
        },
        "Enrollments retrieved successfully",
    )))
}
