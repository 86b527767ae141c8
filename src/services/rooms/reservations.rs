use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::{
    RoomService,
    catalog::{load_room, require_admin},
};
use crate::models::{
    ApiResponse, ErrorCode,
    rooms::{
        entities::{Reservation, ReservationOutcome, ReservationStatus, TimeRange},
        requests::{CreateReservationRequest, ReservationListParams, ReservationListQuery},
        responses::ReservationConflictResponse,
    },
};
use crate::services::{
    OrRespond, Reply, bad_request, current_user, error_response, forbidden, not_found,
    require_text, system::DynamicConfig,
};
use crate::storage::Storage;

fn conflict_reply(conflicting_ids: Vec<i64>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error(
        ErrorCode::ReservationConflict,
        ReservationConflictResponse {
            conflicts: conflicting_ids.len(),
            conflicting_ids,
        },
        "Room is already reserved for an overlapping time",
    ))
}

fn list_query(params: ReservationListParams) -> ReservationListQuery {
    ReservationListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        from: params.from,
        to: params.to,
        status: params.status,
        ..Default::default()
    }
}

async fn load_reservation(
    storage: &Arc<dyn Storage>,
    reservation_id: i64,
) -> Result<Reservation, HttpResponse> {
    storage
        .get_reservation(reservation_id)
        .await
        .or_respond(ErrorCode::ReservationNotFound)?
        .ok_or_else(|| not_found(ErrorCode::ReservationNotFound, "Reservation not found"))
}

/// 校验时间段：结束晚于开始，不早于当前时间，时长不超过上限
async fn requested_range(req: &CreateReservationRequest) -> Result<TimeRange, HttpResponse> {
    let range = TimeRange::new(req.start_at, req.end_at)
        .map_err(|msg| bad_request(ErrorCode::ReservationInvalid, msg))?;
    if range.start < chrono::Utc::now() {
        return Err(bad_request(
            ErrorCode::ReservationInvalid,
            "Reservations cannot start in the past",
        ));
    }
    let max_hours = DynamicConfig::reservation_max_hours().await;
    // 超出 TimeDelta 表示范围的上限视为不限时长
    if let Some(limit) = chrono::TimeDelta::try_hours(max_hours)
        && range.duration() > limit
    {
        return Err(bad_request(
            ErrorCode::ReservationInvalid,
            format!("Reservations cannot exceed {max_hours} hours"),
        ));
    }
    Ok(range)
}

/// 新预约为 pending；与已批准预约重叠时直接拒绝
pub async fn create_reservation(
    service: &RoomService,
    room_id: i64,
    req: CreateReservationRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    load_room(&storage, room_id).await?;

    let range = requested_range(&req).await?;
    let purpose = require_text(&req.purpose, ErrorCode::ReservationInvalid, "purpose")?;

    match storage
        .create_reservation(room_id, user.id, range, purpose)
        .await
        .or_respond(ErrorCode::ReservationInvalid)?
    {
        ReservationOutcome::Accepted(reservation) => {
            info!(
                "Reservation {} requested for room {} by {}",
                reservation.id, room_id, user.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                reservation,
                "Reservation requested",
            )))
        }
        ReservationOutcome::Conflicted(ids) => Err(conflict_reply(ids)),
    }
}

pub async fn list_room_reservations(
    service: &RoomService,
    room_id: i64,
    params: ReservationListParams,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    load_room(&storage, room_id).await?;

    let query = ReservationListQuery {
        room_id: Some(room_id),
        ..list_query(params)
    };
    let reservations = storage
        .list_reservations(query)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        reservations,
        "Reservations retrieved successfully",
    )))
}

pub async fn my_reservations(
    service: &RoomService,
    params: ReservationListParams,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let query = ReservationListQuery {
        requested_by: Some(user.id),
        ..list_query(params)
    };
    let reservations = storage
        .list_reservations(query)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        reservations,
        "Reservations retrieved successfully",
    )))
}

pub async fn pending_reservations(
    service: &RoomService,
    params: ReservationListParams,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    require_admin(&user)?;
    let storage = service.get_storage(request);

    let query = ReservationListQuery {
        status: Some(ReservationStatus::Pending),
        ..list_query(params)
    };
    let reservations = storage
        .list_reservations(query)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        reservations,
        "Pending reservations retrieved successfully",
    )))
}

/// 审批时重新检测冲突
pub async fn approve_reservation(
    service: &RoomService,
    reservation_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    require_admin(&user)?;
    let storage = service.get_storage(request);

    let outcome = storage
        .approve_reservation(reservation_id, user.id)
        .await
        .map_err(|e| error_response(&e, ErrorCode::ReservationStateInvalid))?;
    match outcome {
        ReservationOutcome::Accepted(reservation) => {
            info!("Reservation {} approved by {}", reservation.id, user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                reservation,
                "Reservation approved",
            )))
        }
        ReservationOutcome::Conflicted(ids) => Err(conflict_reply(ids)),
    }
}

pub async fn reject_reservation(
    service: &RoomService,
    reservation_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    require_admin(&user)?;
    let storage = service.get_storage(request);

    let reservation = storage
        .close_reservation(reservation_id, ReservationStatus::Rejected, user.id)
        .await
        .map_err(|e| error_response(&e, ErrorCode::ReservationStateInvalid))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        reservation,
        "Reservation rejected",
    )))
}

/// 申请人或管理员可取消
pub async fn cancel_reservation(
    service: &RoomService,
    reservation_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let existing = load_reservation(&storage, reservation_id).await?;
    if existing.requested_by != user.id && !user.is_admin() {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "Only the requester or an admin can cancel this reservation",
        ));
    }

    let reservation = storage
        .close_reservation(reservation_id, ReservationStatus::Cancelled, user.id)
        .await
        .map_err(|e| error_response(&e, ErrorCode::ReservationStateInvalid))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        reservation,
        "Reservation cancelled",
    )))
}
