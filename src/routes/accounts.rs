use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RateLimit;
use crate::models::users::requests::RegisterRequest;
use crate::services::AccountService;

// 懒加载的全局 AccountService 实例
static ACCOUNT_SERVICE: Lazy<AccountService> = Lazy::new(AccountService::new_lazy);

pub async fn register(
    req: HttpRequest,
    body: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.register(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/accounts").service(
            web::resource("/register")
                .wrap(RateLimit::register())
                .route(web::post().to(register)),
        ),
    );
}
