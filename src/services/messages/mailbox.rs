use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};

use super::MessageService;
use crate::models::{
    ApiResponse, ErrorCode,
    messages::{
        entities::Message,
        requests::{InboxParams, SentParams},
        responses::UnreadCountResponse,
    },
};
use crate::services::{OrRespond, Reply, current_user, forbidden, not_found};
use crate::storage::Storage;

async fn load_message(
    storage: &Arc<dyn Storage>,
    message_id: i64,
) -> Result<Message, HttpResponse> {
    storage
        .get_message(message_id)
        .await
        .or_respond(ErrorCode::MessageNotFound)?
        .ok_or_else(|| not_found(ErrorCode::MessageNotFound, "Message not found"))
}

pub async fn inbox(service: &MessageService, params: InboxParams, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let (page, size) = params.pagination.normalized();

    let messages = storage
        .list_inbox(user.id, params.unread_only(), page, size)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        messages,
        "Inbox retrieved successfully",
    )))
}

pub async fn sent(service: &MessageService, params: SentParams, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let (page, size) = params.pagination.normalized();

    let messages = storage
        .list_sent(user.id, page, size)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        messages,
        "Sent messages retrieved successfully",
    )))
}

/// 只有收发双方能查看；接收者打开时自动标记已读
pub async fn get_message(service: &MessageService, message_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let mut message = load_message(&storage, message_id).await?;

    if !message.is_participant(user.id) {
        return Err(not_found(ErrorCode::MessageNotFound, "Message not found"));
    }
    if message.recipient_id == user.id
        && message.read_at.is_none()
        && let Some(read) = storage
            .mark_message_read(message_id)
            .await
            .or_respond(ErrorCode::InternalServerError)?
    {
        message = read;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        message,
        "Message retrieved successfully",
    )))
}

pub async fn mark_read(service: &MessageService, message_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let message = load_message(&storage, message_id).await?;

    if message.recipient_id != user.id {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "Only the recipient can mark a message as read",
        ));
    }
    let message = storage
        .mark_message_read(message_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?
        .ok_or_else(|| not_found(ErrorCode::MessageNotFound, "Message not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(message, "Message marked as read")))
}

pub async fn unread_count(service: &MessageService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let unread = storage
        .count_unread_messages(user.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UnreadCountResponse { unread },
        "Unread count retrieved successfully",
    )))
}

/// 任一方删除即对双方移除
pub async fn delete_message(
    service: &MessageService,
    message_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let message = load_message(&storage, message_id).await?;

    if !message.is_participant(user.id) {
        return Err(not_found(ErrorCode::MessageNotFound, "Message not found"));
    }
    storage
        .delete_message(message_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Message deleted")))
}
