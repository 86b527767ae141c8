use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};

use super::AnnouncementService;
use crate::models::{
    ApiResponse, ErrorCode, PaginatedResponse,
    announcements::{AnnouncementListParams, AnnouncementScope, Viewer},
    attributes::EntityType,
    enrollments::entities::EnrollmentStatus,
    users::entities::{User, UserRole},
};
use crate::services::{AttributeStore, OrRespond, Reply, current_user};
use crate::storage::Storage;

/// 学生的在读开课
async fn current_offerings(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<HashSet<i64>, HttpResponse> {
    let enrollments = storage
        .list_enrollments_by_student(student_id, None)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(enrollments
        .into_iter()
        .filter(|e| {
            matches!(
                e.status,
                EnrollmentStatus::Approved | EnrollmentStatus::DropPending
            )
        })
        .map(|e| e.offered_course_id)
        .collect())
}

/// 按角色收集查看者关联的开课
async fn viewer_for(storage: &Arc<dyn Storage>, user: &User) -> Result<Viewer, HttpResponse> {
    let mut offering_ids = HashSet::new();
    match user.role {
        UserRole::Admin => {}
        UserRole::Instructor => {
            if let Some(instructor) = storage
                .get_instructor_by_user_id(user.id)
                .await
                .or_respond(ErrorCode::InternalServerError)?
            {
                offering_ids.extend(
                    storage
                        .list_offered_courses_by_instructor(instructor.id)
                        .await
                        .or_respond(ErrorCode::InternalServerError)?
                        .into_iter()
                        .map(|o| o.id),
                );
            }
        }
        UserRole::Student => {
            if let Some(student) = storage
                .get_student_by_user_id(user.id)
                .await
                .or_respond(ErrorCode::InternalServerError)?
            {
                offering_ids = current_offerings(storage, student.id).await?;
            }
        }
        UserRole::Parent => {
            let children = storage
                .list_students_by_parent(user.id)
                .await
                .or_respond(ErrorCode::InternalServerError)?;
            for child in children {
                offering_ids.extend(current_offerings(storage, child.id).await?);
            }
        }
    }
    Ok(Viewer {
        role: user.role,
        offering_ids,
    })
}

/// 最新的在前，只返回当前用户可见的公告
pub async fn list(
    service: &AnnouncementService,
    params: AnnouncementListParams,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let viewer = viewer_for(&storage, &user).await?;

    let announcements = storage
        .list_announcements()
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    let ids: Vec<i64> = announcements.iter().map(|a| a.id).collect();
    let scopes = AttributeStore::from_request(storage, request)
        .maps_for(EntityType::Announcement, &ids)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    let visible: Vec<_> = announcements
        .into_iter()
        .map(|mut a| {
            if let Some(attrs) = scopes.get(&a.id) {
                a.scope = AnnouncementScope::from_attributes(attrs);
            }
            a
        })
        .filter(|a| a.scope.is_visible_to(&viewer))
        .collect();

    let (page, size) = params.pagination.normalized();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PaginatedResponse::paginate(visible, page, size),
        "Announcements retrieved successfully",
    )))
}
