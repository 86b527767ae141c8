use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use serde_json::{Map, Value};

use super::RoomService;
use crate::models::{
    ApiResponse, ErrorCode,
    attributes::{AttributeMap, AttributeValue, EntityType, to_json_map},
    rooms::{
        entities::{Room, TimeRange},
        requests::{
            AvailableRoomsParams, CreateRoomRequest, RoomListParams, RoomSearchParams,
            UpdateRoomRequest,
        },
        responses::RoomDetail,
    },
    users::entities::User,
};
use crate::services::{
    AttributeStore, OrRespond, Reply, bad_request, conflict, current_user, forbidden, not_found,
    require_text,
};
use crate::storage::Storage;

pub(crate) fn require_admin(user: &User) -> Result<(), HttpResponse> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(forbidden(ErrorCode::Forbidden, "Admin privileges required"))
    }
}

pub(crate) async fn load_room(storage: &Arc<dyn Storage>, room_id: i64) -> Result<Room, HttpResponse> {
    storage
        .get_room(room_id)
        .await
        .or_respond(ErrorCode::RoomNotFound)?
        .ok_or_else(|| not_found(ErrorCode::RoomNotFound, "Room not found"))
}

fn check_capacity(capacity: i32) -> Result<(), HttpResponse> {
    if capacity > 0 {
        Ok(())
    } else {
        Err(bad_request(
            ErrorCode::RoomInvalid,
            "Capacity must be greater than 0",
        ))
    }
}

/// 名称在教室之间唯一
async fn ensure_name_free(
    storage: &Arc<dyn Storage>,
    name: &str,
    except: Option<i64>,
) -> Result<(), HttpResponse> {
    let existing = storage
        .get_room_by_name(name)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    match existing {
        Some(room) if Some(room.id) != except => Err(conflict(
            ErrorCode::RoomNameExists,
            format!("Room '{name}' already exists"),
        )),
        _ => Ok(()),
    }
}

/// 所有列出的布尔属性都为 true
fn has_features(attrs: Option<&AttributeMap>, features: &[String]) -> bool {
    features.iter().all(|feature| {
        attrs
            .and_then(|a| a.get(feature))
            .is_some_and(|v| matches!(v, AttributeValue::Boolean(true)))
    })
}

async fn room_detail(
    attributes: &AttributeStore,
    room: Room,
) -> Result<RoomDetail, HttpResponse> {
    let attrs = attributes
        .map(EntityType::Room, room.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(RoomDetail {
        room,
        attributes: to_json_map(&attrs),
    })
}

pub async fn create_room(
    service: &RoomService,
    mut req: CreateRoomRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    require_admin(&user)?;
    let storage = service.get_storage(request);

    req.name = require_text(&req.name, ErrorCode::RoomInvalid, "name")?;
    check_capacity(req.capacity)?;
    ensure_name_free(&storage, &req.name, None).await?;

    let room = storage
        .create_room(req)
        .await
        .or_respond(ErrorCode::RoomInvalid)?;
    Ok(HttpResponse::Created().json(ApiResponse::success(room, "Room created")))
}

pub async fn list_rooms(service: &RoomService, params: RoomListParams, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);
    let (page, size) = params.pagination.normalized();

    let rooms = storage
        .list_rooms(page, size)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(rooms, "Rooms retrieved successfully")))
}

pub async fn get_room(service: &RoomService, room_id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);
    let room = load_room(&storage, room_id).await?;
    let detail = room_detail(&AttributeStore::from_request(storage, request), room).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Room retrieved successfully")))
}

pub async fn update_room(
    service: &RoomService,
    room_id: i64,
    mut req: UpdateRoomRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    require_admin(&user)?;
    let storage = service.get_storage(request);
    load_room(&storage, room_id).await?;

    if let Some(name) = &req.name {
        let name = require_text(name, ErrorCode::RoomInvalid, "name")?;
        ensure_name_free(&storage, &name, Some(room_id)).await?;
        req.name = Some(name);
    }
    if let Some(capacity) = req.capacity {
        check_capacity(capacity)?;
    }

    let room = storage
        .update_room(room_id, req)
        .await
        .or_respond(ErrorCode::RoomInvalid)?
        .ok_or_else(|| not_found(ErrorCode::RoomNotFound, "Room not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(room, "Room updated")))
}

pub async fn delete_room(service: &RoomService, room_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    require_admin(&user)?;
    let storage = service.get_storage(request);
    load_room(&storage, room_id).await?;

    storage
        .delete_room(room_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    AttributeStore::from_request(storage, request)
        .delete_all(EntityType::Room, room_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Room deleted")))
}

/// 逐项写入，值类型由 JSON 推断
pub async fn set_attributes(
    service: &RoomService,
    room_id: i64,
    values: Map<String, Value>,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    require_admin(&user)?;
    let storage = service.get_storage(request);
    let room = load_room(&storage, room_id).await?;

    if values.is_empty() {
        return Err(bad_request(
            ErrorCode::AttributeInvalid,
            "At least one attribute is required",
        ));
    }

    let attributes = AttributeStore::from_request(storage, request);
    for (name, value) in &values {
        attributes
            .set_json(EntityType::Room, room_id, name, value)
            .await
            .or_respond(ErrorCode::AttributeInvalid)?;
    }

    let detail = room_detail(&attributes, room).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Room attributes updated")))
}

pub async fn delete_attribute(
    service: &RoomService,
    room_id: i64,
    name: &str,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    require_admin(&user)?;
    let storage = service.get_storage(request);
    load_room(&storage, room_id).await?;

    let removed = AttributeStore::from_request(storage, request)
        .delete(EntityType::Room, room_id, name)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    if !removed {
        return Err(not_found(
            ErrorCode::AttributeNotFound,
            format!("Attribute '{name}' not found"),
        ));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Room attribute deleted")))
}

pub async fn search_rooms(
    service: &RoomService,
    params: RoomSearchParams,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let features = params.feature_list();

    let rooms = storage
        .list_rooms_with_capacity(params.min_capacity)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    let ids: Vec<i64> = rooms.iter().map(|r| r.id).collect();
    let attrs = AttributeStore::from_request(storage, request)
        .maps_for(EntityType::Room, &ids)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    let matched: Vec<RoomDetail> = rooms
        .into_iter()
        .filter(|room| has_features(attrs.get(&room.id), &features))
        .map(|room| RoomDetail {
            attributes: attrs.get(&room.id).map(to_json_map).unwrap_or_default(),
            room,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(matched, "Rooms retrieved successfully")))
}

/// 时间段内没有已批准预约的教室
pub async fn available_rooms(
    service: &RoomService,
    params: AvailableRoomsParams,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let range = TimeRange::new(params.start_at, params.end_at)
        .map_err(|msg| bad_request(ErrorCode::ReservationInvalid, msg))?;

    let busy: HashSet<i64> = storage
        .list_approved_overlapping(range)
        .await
        .or_respond(ErrorCode::InternalServerError)?
        .into_iter()
        .map(|r| r.room_id)
        .collect();
    let rooms: Vec<Room> = storage
        .list_rooms_with_capacity(params.min_capacity)
        .await
        .or_respond(ErrorCode::InternalServerError)?
        .into_iter()
        .filter(|room| !busy.contains(&room.id))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        rooms,
        "Available rooms retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_features_requires_true_booleans() {
        let mut attrs = AttributeMap::new();
        attrs.insert("projector".into(), AttributeValue::Boolean(true));
        attrs.insert("whiteboard".into(), AttributeValue::Boolean(false));
        attrs.insert("seats_note".into(), AttributeValue::Text("true".into()));

        assert!(has_features(Some(&attrs), &["projector".into()]));
        assert!(!has_features(Some(&attrs), &["whiteboard".into()]));
        assert!(!has_features(Some(&attrs), &["seats_note".into()]));
        assert!(!has_features(None, &["projector".into()]));
        assert!(has_features(None, &[]));
    }
}
