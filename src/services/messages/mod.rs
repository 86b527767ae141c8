//! 站内信

pub mod mailbox;
pub mod send;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::messages::requests::{InboxParams, SendMessageRequest, SentParams};
use crate::services::respond;
use crate::storage::Storage;

pub struct MessageService {
    storage: Option<Arc<dyn Storage>>,
}

impl MessageService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn send_message(
        &self,
        req: SendMessageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(send::send_message(self, req, request).await)
    }

    pub async fn inbox(
        &self,
        params: InboxParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(mailbox::inbox(self, params, request).await)
    }

    pub async fn sent(&self, params: SentParams, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(mailbox::sent(self, params, request).await)
    }

    pub async fn get_message(
        &self,
        message_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(mailbox::get_message(self, message_id, request).await)
    }

    pub async fn mark_read(
        &self,
        message_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(mailbox::mark_read(self, message_id, request).await)
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(mailbox::unread_count(self, request).await)
    }

    pub async fn delete_message(
        &self,
        message_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(mailbox::delete_message(self, message_id, request).await)
    }
}
