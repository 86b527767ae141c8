use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireUser;
use crate::models::PaginationQuery;
use crate::models::profile::requests::ProfileChangeRequest;
use crate::services::ProfileService;

// 懒加载的全局 ProfileService 实例
static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);

pub async fn get_my_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.get_my_profile(&req).await
}

pub async fn request_change(
    req: HttpRequest,
    body: web::Json<ProfileChangeRequest>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.request_change(body.into_inner(), &req).await
}

pub async fn list_my_changes(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.list_my_changes(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/profile")
            .wrap(RequireUser)
            .route("", web::get().to(get_my_profile))
            .route("/changes", web::post().to(request_change))
            .route("/changes", web::get().to(list_my_changes)),
    );
}
