use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};

use super::ParentService;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::responses::TranscriptResponse,
    users::{entities::{Student, User}, responses::ChildSummary},
};
use crate::services::{
    AttributeStore, OrRespond, Reply, current_user, enrollments::details::enrollment_details,
    forbidden,
};
use crate::storage::Storage;

/// 只有学生档案上登记的家长账号可以访问
async fn linked_child(
    storage: &Arc<dyn Storage>,
    parent: &User,
    student_id: i64,
) -> Result<Student, HttpResponse> {
    let student = storage
        .get_student_by_id(student_id)
        .await
        .or_respond(ErrorCode::StudentProfileNotFound)?;
    match student {
        Some(student) if student.parent_user_id == Some(parent.id) => Ok(student),
        _ => Err(forbidden(
            ErrorCode::Forbidden,
            "Student is not linked to your account",
        )),
    }
}

pub async fn list_children(service: &ParentService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let students = storage
        .list_students_by_parent(user.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    let mut children = Vec::with_capacity(students.len());
    for student in students {
        let account = storage
            .get_user_by_id(student.user_id)
            .await
            .or_respond(ErrorCode::InternalServerError)?;
        // 账号已删除的档案不展示
        if let Some(account) = account {
            children.push(ChildSummary {
                full_name: account.full_name,
                email: account.email,
                student,
            });
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        children,
        "Children retrieved successfully",
    )))
}

pub async fn child_grades(service: &ParentService, student_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let student = linked_child(&storage, &user, student_id).await?;

    let entries = storage
        .list_transcript(student.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TranscriptResponse::from_entries(student.id, entries),
        "Grades retrieved successfully",
    )))
}

pub async fn child_enrollments(
    service: &ParentService,
    student_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let student = linked_child(&storage, &user, student_id).await?;

    let enrollments = storage
        .list_enrollments_by_student(student.id, None)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    let attributes = AttributeStore::from_request(storage.clone(), request);
    let details = enrollment_details(&storage, &attributes, enrollments).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        details,
        "Enrollments retrieved successfully",
    )))
}
