use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireUser};
use crate::models::messages::requests::{InboxParams, SendMessageRequest, SentParams};
use crate::services::MessageService;
use crate::utils::SafeIDI64;

// 懒加载的全局 MessageService 实例
static MESSAGE_SERVICE: Lazy<MessageService> = Lazy::new(MessageService::new_lazy);

pub async fn send_message(
    req: HttpRequest,
    body: web::Json<SendMessageRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.send_message(body.into_inner(), &req).await
}

pub async fn inbox(
    req: HttpRequest,
    query: web::Query<InboxParams>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.inbox(query.into_inner(), &req).await
}

pub async fn sent(req: HttpRequest, query: web::Query<SentParams>) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.sent(query.into_inner(), &req).await
}

pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.unread_count(&req).await
}

pub async fn get_message(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.get_message(id.0, &req).await
}

pub async fn mark_read(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.mark_read(id.0, &req).await
}

pub async fn delete_message(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.delete_message(id.0, &req).await
}

// 配置路由
pub fn configure_message_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/message")
            .wrap(middleware::Compress::default())
            .wrap(RequireUser)
            .service(
                web::resource("/send")
                    .wrap(RateLimit::message_send())
                    .route(web::post().to(send_message)),
            )
            .route("/inbox", web::get().to(inbox))
            .route("/sent", web::get().to(sent))
            .route("/unread-count", web::get().to(unread_count))
            .route("/{id}", web::get().to(get_message))
            .route("/{id}", web::delete().to(delete_message))
            .route("/{id}/read", web::post().to(mark_read)),
    );
}
