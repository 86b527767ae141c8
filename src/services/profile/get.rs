use actix_web::{HttpRequest, HttpResponse};

use super::ProfileService;
use crate::models::ApiResponse;
use crate::services::{Reply, accounts::users::user_detail, current_user};

pub async fn get_my_profile(service: &ProfileService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let detail = user_detail(&storage, user).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        detail,
        "Profile retrieved successfully",
    )))
}
