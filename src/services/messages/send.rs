use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::MessageService;
use crate::models::{
    ApiResponse, ErrorCode,
    messages::{
        entities::{Kinship, MAX_SUBJECT_LEN, can_message},
        requests::SendMessageRequest,
    },
    users::entities::{User, UserRole},
};
use crate::services::{
    OrRespond, Reply, bad_request, current_user, forbidden, not_found, require_text,
};
use crate::storage::Storage;

/// 学生与家长之间的关联只看学生档案上的 parent_user_id
async fn kinship(
    storage: &Arc<dyn Storage>,
    sender: &User,
    recipient: &User,
) -> Result<Kinship, HttpResponse> {
    let mut kinship = Kinship::default();
    match (sender.role, recipient.role) {
        (UserRole::Student, UserRole::Parent) => {
            let student = storage
                .get_student_by_user_id(sender.id)
                .await
                .or_respond(ErrorCode::InternalServerError)?;
            kinship.recipient_is_parent_of_sender =
                student.is_some_and(|s| s.parent_user_id == Some(recipient.id));
        }
        (UserRole::Parent, UserRole::Student) => {
            let student = storage
                .get_student_by_user_id(recipient.id)
                .await
                .or_respond(ErrorCode::InternalServerError)?;
            kinship.recipient_is_child_of_sender =
                student.is_some_and(|s| s.parent_user_id == Some(sender.id));
        }
        _ => {}
    }
    Ok(kinship)
}

pub async fn send_message(
    service: &MessageService,
    req: SendMessageRequest,
    request: &HttpRequest,
) -> Reply {
    let sender = current_user(request)?;
    let storage = service.get_storage(request);

    if req.recipient_id == sender.id {
        return Err(bad_request(
            ErrorCode::MessageInvalid,
            "Cannot send a message to yourself",
        ));
    }
    let subject = require_text(&req.subject, ErrorCode::MessageInvalid, "subject")?;
    if subject.chars().count() > MAX_SUBJECT_LEN {
        return Err(bad_request(
            ErrorCode::MessageInvalid,
            format!("Subject must be at most {MAX_SUBJECT_LEN} characters"),
        ));
    }
    let body = require_text(&req.body, ErrorCode::MessageInvalid, "body")?;

    let recipient = storage
        .get_user_by_id(req.recipient_id)
        .await
        .or_respond(ErrorCode::UserNotFound)?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "Recipient not found"))?;
    if !recipient.is_active() {
        return Err(forbidden(
            ErrorCode::MessageNotAllowed,
            "Recipient account is not active",
        ));
    }

    let kinship = kinship(&storage, &sender, &recipient).await?;
    if !can_message(sender.role, recipient.role, kinship) {
        return Err(forbidden(
            ErrorCode::MessageNotAllowed,
            format!(
                "A {} cannot send messages to this {}",
                sender.role, recipient.role
            ),
        ));
    }

    let message = storage
        .create_message(sender.id, recipient.id, subject, body)
        .await
        .or_respond(ErrorCode::MessageInvalid)?;

    info!("Message {} sent from {} to {}", message.id, sender.id, recipient.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(message, "Message sent")))
}
