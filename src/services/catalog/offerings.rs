use actix_web::{HttpRequest, HttpResponse};

use super::CatalogService;
use crate::models::{
    ApiResponse, ErrorCode,
    attributes::EntityType,
    catalog::{
        requests::{
            CreateOfferedCourseRequest, OfferedCourseListParams, OfferedCourseListQuery,
            UpdateOfferedCourseRequest,
        },
        responses::OfferedCourseDetailResponse,
    },
};
use crate::services::{
    AttributeStore, OrRespond, Reply, access, bad_request, conflict, not_found,
};

pub async fn create_offered_course(
    service: &CatalogService,
    req: CreateOfferedCourseRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    if req.capacity <= 0 {
        return Err(bad_request(
            ErrorCode::OfferedCourseInvalid,
            "Capacity must be positive",
        ));
    }

    storage
        .get_course(req.course_id)
        .await
        .or_respond(ErrorCode::CourseNotFound)?
        .ok_or_else(|| not_found(ErrorCode::CourseNotFound, "Course not found"))?;
    storage
        .get_semester(req.semester_id)
        .await
        .or_respond(ErrorCode::SemesterNotFound)?
        .ok_or_else(|| not_found(ErrorCode::SemesterNotFound, "Semester not found"))?;
    storage
        .get_instructor_by_id(req.instructor_id)
        .await
        .or_respond(ErrorCode::InstructorProfileNotFound)?
        .ok_or_else(|| not_found(ErrorCode::InstructorProfileNotFound, "Instructor not found"))?;

    let duplicate = storage
        .find_offered_course(req.course_id, req.semester_id)
        .await
        .or_respond(ErrorCode::OfferedCourseExists)?
        .is_some();
    if duplicate {
        return Err(conflict(
            ErrorCode::OfferedCourseExists,
            "Course is already offered in this semester",
        ));
    }

    let offering = storage
        .create_offered_course(req)
        .await
        .or_respond(ErrorCode::OfferedCourseExists)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        offering,
        "Offered course created successfully",
    )))
}

pub async fn list_offered_courses(
    service: &CatalogService,
    query: OfferedCourseListParams,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let list_query = OfferedCourseListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        semester_id: query.semester_id,
        course_id: query.course_id,
        instructor_id: query.instructor_id,
    };

    let response = storage
        .list_offered_courses(list_query)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Offered courses retrieved successfully",
    )))
}

pub async fn get_offered_course(service: &CatalogService, id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let offered_course = access::offered_course(&storage, id).await?;
    let course = storage
        .get_course(offered_course.course_id)
        .await
        .or_respond(ErrorCode::CourseNotFound)?
        .ok_or_else(|| not_found(ErrorCode::CourseNotFound, "Course not found"))?;
    let sections = storage
        .list_sections(id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        OfferedCourseDetailResponse {
            offered_course,
            course,
            sections,
        },
        "Offered course retrieved successfully",
    )))
}

/// 容量不能低于已选人数
pub async fn update_offered_course(
    service: &CatalogService,
    id: i64,
    req: UpdateOfferedCourseRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let current = access::offered_course(&storage, id).await?;

    if let Some(capacity) = req.capacity
        && (capacity <= 0 || capacity < current.enrolled_count)
    {
        return Err(bad_request(
            ErrorCode::OfferedCourseInvalid,
            format!(
                "Capacity must be positive and at least the {} enrolled student(s)",
                current.enrolled_count
            ),
        ));
    }
    if let Some(instructor_id) = req.instructor_id {
        storage
            .get_instructor_by_id(instructor_id)
            .await
            .or_respond(ErrorCode::InstructorProfileNotFound)?
            .ok_or_else(|| {
                not_found(ErrorCode::InstructorProfileNotFound, "Instructor not found")
            })?;
    }

    let offering = storage
        .update_offered_course(id, req)
        .await
        .or_respond(ErrorCode::OfferedCourseInvalid)?
        .ok_or_else(|| not_found(ErrorCode::OfferedCourseNotFound, "Offered course not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        offering,
        "Offered course updated successfully",
    )))
}

/// 连同成绩组成等属性一起删除
pub async fn delete_offered_course(
    service: &CatalogService,
    id: i64,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let deleted = storage
        .delete_offered_course(id)
        .await
        .or_respond(ErrorCode::OfferedCourseNotFound)?;
    if !deleted {
        return Err(not_found(
            ErrorCode::OfferedCourseNotFound,
            "Offered course not found",
        ));
    }

    AttributeStore::from_request(storage, request)
        .invalidate(EntityType::OfferedCourse, id)
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Offered course deleted successfully",
    )))
}
