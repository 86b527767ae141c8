//! 教室与预约路由
//!
//! 管理员专属操作在服务层校验角色，这里只要求登录。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireUser;
use crate::models::rooms::requests::{
    AvailableRoomsParams, CreateReservationRequest, CreateRoomRequest, ReservationListParams,
    RoomListParams, RoomSearchParams, UpdateRoomRequest,
};
use crate::services::RoomService;
use crate::utils::{SafeAttributeName, SafeIDI64};

// 懒加载的全局 RoomService 实例
static ROOM_SERVICE: Lazy<RoomService> = Lazy::new(RoomService::new_lazy);

pub async fn create_room(
    req: HttpRequest,
    body: web::Json<CreateRoomRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.create_room(body.into_inner(), &req).await
}

pub async fn list_rooms(
    req: HttpRequest,
    query: web::Query<RoomListParams>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.list_rooms(query.into_inner(), &req).await
}

pub async fn get_room(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.get_room(id.0, &req).await
}

pub async fn update_room(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateRoomRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .update_room(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_room(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.delete_room(id.0, &req).await
}

pub async fn set_room_attributes(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<serde_json::Map<String, serde_json::Value>>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .set_attributes(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_room_attribute(
    req: HttpRequest,
    id: SafeIDI64,
    name: SafeAttributeName,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.delete_attribute(id.0, name.0, &req).await
}

pub async fn search_rooms(
    req: HttpRequest,
    query: web::Query<RoomSearchParams>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.search_rooms(query.into_inner(), &req).await
}

pub async fn available_rooms(
    req: HttpRequest,
    query: web::Query<AvailableRoomsParams>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.available_rooms(query.into_inner(), &req).await
}

pub async fn create_reservation(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreateReservationRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .create_reservation(id.0, body.into_inner(), &req)
        .await
}

pub async fn list_room_reservations(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<ReservationListParams>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .list_room_reservations(id.0, query.into_inner(), &req)
        .await
}

pub async fn my_reservations(
    req: HttpRequest,
    query: web::Query<ReservationListParams>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.my_reservations(query.into_inner(), &req).await
}

pub async fn pending_reservations(
    req: HttpRequest,
    query: web::Query<ReservationListParams>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .pending_reservations(query.into_inner(), &req)
        .await
}

pub async fn approve_reservation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.approve_reservation(id.0, &req).await
}

pub async fn reject_reservation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.reject_reservation(id.0, &req).await
}

pub async fn cancel_reservation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.cancel_reservation(id.0, &req).await
}

// 配置路由
pub fn configure_room_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/rooms")
            .wrap(middleware::Compress::default())
            .wrap(RequireUser)
            // 固定路径需先于 /{id} 注册
            .route("/search", web::get().to(search_rooms))
            .route("/available", web::get().to(available_rooms))
            .route("/reservations/mine", web::get().to(my_reservations))
            .route("/reservations/pending", web::get().to(pending_reservations))
            .route(
                "/reservations/{id}/approve",
                web::post().to(approve_reservation),
            )
            .route(
                "/reservations/{id}/reject",
                web::post().to(reject_reservation),
            )
            .route(
                "/reservations/{id}/cancel",
                web::post().to(cancel_reservation),
            )
            .route("", web::post().to(create_room))
            .route("", web::get().to(list_rooms))
            .route("/{id}", web::get().to(get_room))
            .route("/{id}", web::put().to(update_room))
            .route("/{id}", web::delete().to(delete_room))
            .route("/{id}/attributes", web::put().to(set_room_attributes))
            .route(
                "/{id}/attributes/{name}",
                web::delete().to(delete_room_attribute),
            )
            .route(
                "/{id}/reservations",
                web::post().to(create_reservation),
            )
            .route(
                "/{id}/reservations",
                web::get().to(list_room_reservations),
            ),
    );
}
