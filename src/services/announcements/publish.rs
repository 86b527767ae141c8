use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::AnnouncementService;
use crate::models::{
    ApiResponse, ErrorCode,
    announcements::{AnnouncementScope, PublishAnnouncementRequest},
    attributes::EntityType,
};
use crate::services::{
    AttributeStore, OrRespond, Reply, access, current_user, forbidden, not_found, require_text,
};

/// 管理员可发布全校公告；教师只能发布到自己所授的开课
pub async fn publish(
    service: &AnnouncementService,
    req: PublishAnnouncementRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let title = require_text(&req.title, ErrorCode::AnnouncementInvalid, "title")?;
    let body = require_text(&req.body, ErrorCode::AnnouncementInvalid, "body")?;

    match req.offered_course_id {
        Some(offered_course_id) => {
            access::offering_for_staff(&storage, offered_course_id, &user).await?;
        }
        None if !user.is_admin() => {
            return Err(forbidden(
                ErrorCode::Forbidden,
                "Only admins can publish announcements without a course",
            ));
        }
        None => {}
    }

    let scope = AnnouncementScope {
        offered_course_id: req.offered_course_id,
        role: req.audience_role,
    };

    let mut announcement = storage
        .create_announcement(user.id, title, body)
        .await
        .or_respond(ErrorCode::AnnouncementInvalid)?;

    let attributes = AttributeStore::from_request(storage, request);
    for (name, value) in scope.to_attributes() {
        attributes
            .set(EntityType::Announcement, announcement.id, name, value)
            .await
            .or_respond(ErrorCode::AnnouncementInvalid)?;
    }
    announcement.scope = scope;

    info!("Announcement {} published by {}", announcement.id, user.username);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        announcement,
        "Announcement published",
    )))
}

pub async fn delete(
    service: &AnnouncementService,
    announcement_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let announcement = storage
        .get_announcement(announcement_id)
        .await
        .or_respond(ErrorCode::AnnouncementNotFound)?
        .ok_or_else(|| not_found(ErrorCode::AnnouncementNotFound, "Announcement not found"))?;
    if announcement.author_id != user.id && !user.is_admin() {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "Only the author or an admin can delete this announcement",
        ));
    }

    storage
        .delete_announcement(announcement_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    AttributeStore::from_request(storage, request)
        .delete_all(EntityType::Announcement, announcement_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Announcement deleted")))
}
