use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DynamicConfig, SystemService};
use crate::models::{
    ApiResponse, ErrorCode,
    system::{
        entities::KnownSettingKey,
        requests::UpdateSettingRequest,
        responses::{AdminSettingsListResponse, SettingResponse},
    },
};
use crate::services::{bad_request, current_user, error_response, not_found};

/// 全部运行期配置
pub async fn list_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_all_settings().await {
        Ok(settings) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AdminSettingsListResponse { settings },
            "Settings retrieved successfully",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("Failed to list settings: {e}"),
        ))),
    }
}

/// 校验并更新一个配置，成功后同步到动态配置缓存
pub async fn update_setting(
    service: &SystemService,
    key: String,
    update: UpdateSettingRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let known = match key.parse::<KnownSettingKey>() {
        Ok(k) => k,
        Err(msg) => return Ok(not_found(ErrorCode::SettingNotFound, msg)),
    };

    let value = update.value_text();
    if let Err(msg) = known.validate(&value) {
        return Ok(bad_request(ErrorCode::SettingInvalid, msg));
    }

    let storage = service.get_storage(request);
    let setting = match storage.update_setting(known.as_str(), &value, user.id).await {
        Ok(s) => s,
        Err(e) => return Ok(error_response(&e, ErrorCode::SettingNotFound)),
    };

    DynamicConfig::update(known.as_str(), &value).await;
    tracing::info!("Setting {} updated by user {}", known.as_str(), user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SettingResponse { setting },
        "Setting updated successfully",
    )))
}
