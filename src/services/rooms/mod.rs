//! 教室管理、属性检索与预约审批

pub mod catalog;
pub mod reservations;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::rooms::requests::{
    AvailableRoomsParams, CreateReservationRequest, CreateRoomRequest, ReservationListParams,
    RoomListParams, RoomSearchParams, UpdateRoomRequest,
};
use crate::services::respond;
use crate::storage::Storage;

pub struct RoomService {
    storage: Option<Arc<dyn Storage>>,
}

impl RoomService {
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

    pub async fn create_room(
        &self,
        req: CreateRoomRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(catalog::create_room(self, req, request).await)
    }

    pub async fn list_rooms(
        &self,
        params: RoomListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(catalog::list_rooms(self, params, request).await)
    }

    pub async fn get_room(&self, room_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(catalog::get_room(self, room_id, request).await)
    }

    pub async fn update_room(
        &self,
        room_id: i64,
        req: UpdateRoomRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(catalog::update_room(self, room_id, req, request).await)
    }

    pub async fn delete_room(
        &self,
        room_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(catalog::delete_room(self, room_id, request).await)
    }

    pub async fn set_attributes(
        &self,
        room_id: i64,
        values: serde_json::Map<String, serde_json::Value>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(catalog::set_attributes(self, room_id, values, request).await)
    }

    pub async fn delete_attribute(
        &self,
        room_id: i64,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(catalog::delete_attribute(self, room_id, &name, request).await)
    }

    pub async fn search_rooms(
        &self,
        params: RoomSearchParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(catalog::search_rooms(self, params, request).await)
    }

    pub async fn available_rooms(
        &self,
        params: AvailableRoomsParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(catalog::available_rooms(self, params, request).await)
    }

    pub async fn create_reservation(
        &self,
        room_id: i64,
        req: CreateReservationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(reservations::create_reservation(self, room_id, req, request).await)
    }

    pub async fn list_room_reservations(
        &self,
        room_id: i64,
        params: ReservationListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(reservations::list_room_reservations(self, room_id, params, request).await)
    }

    pub async fn my_reservations(
        &self,
        params: ReservationListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(reservations::my_reservations(self, params, request).await)
    }

    pub async fn pending_reservations(
        &self,
        params: ReservationListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(reservations::pending_reservations(self, params, request).await)
    }

    pub async fn approve_reservation(
        &self,
        reservation_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(reservations::approve_reservation(self, reservation_id, request).await)
    }

    pub async fn reject_reservation(
        &self,
        reservation_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(reservations::reject_reservation(self, reservation_id, request).await)
    }

    pub async fn cancel_reservation(
        &self,
        reservation_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(reservations::cancel_reservation(self, reservation_id, request).await)
    }
}
