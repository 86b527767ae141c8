use actix_web::{HttpRequest, HttpResponse};

use super::GradingService;
use crate::models::{
    ApiResponse, ErrorCode,
    attributes::{AttributeValue, EntityType},
    grades::{
        entities::{COMPONENT_PREFIX, components_from_attributes, validate_components},
        requests::SetComponentsRequest,
        responses::GradeComponentsResponse,
    },
};
use crate::services::{AttributeStore, OrRespond, Reply, access, bad_request, current_user};

/// 整体替换成绩组成，权重之和必须为 100
pub async fn set_components(
    service: &GradingService,
    offered_course_id: i64,
    req: SetComponentsRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    access::offering_for_staff(&storage, offered_course_id, &user).await?;

    validate_components(&req.components)
        .map_err(|msg| bad_request(ErrorCode::GradeComponentsInvalid, msg))?;

    let values = req
        .components
        .iter()
        .map(|c| {
            (
                format!("{COMPONENT_PREFIX}{}", c.name),
                AttributeValue::Decimal(c.weight),
            )
        })
        .collect();

    let attributes = AttributeStore::from_request(storage, request);
    attributes
        .replace_prefix(
            EntityType::OfferedCourse,
            offered_course_id,
            COMPONENT_PREFIX,
            values,
        )
        .await
        .or_respond(ErrorCode::GradeComponentsInvalid)?;

    let map = attributes
        .map(EntityType::OfferedCourse, offered_course_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeComponentsResponse {
            offered_course_id,
            components: components_from_attributes(&map),
        },
        "Grade components updated",
    )))
}

pub async fn get_components(
    service: &GradingService,
    offered_course_id: i64,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    access::offered_course(&storage, offered_course_id).await?;

    let map = AttributeStore::from_request(storage, request)
        .map(EntityType::OfferedCourse, offered_course_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeComponentsResponse {
            offered_course_id,
            components: components_from_attributes(&map),
        },
        "Grade components retrieved successfully",
    )))
}
