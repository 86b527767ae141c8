use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireRole, RequireUser};
use crate::models::users::entities::UserRole;
use crate::services::ParentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ParentService 实例
static PARENT_SERVICE: Lazy<ParentService> = Lazy::new(ParentService::new_lazy);

pub async fn list_children(req: HttpRequest) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.list_children(&req).await
}

pub async fn child_grades(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.child_grades(id.0, &req).await
}

pub async fn child_enrollments(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.child_enrollments(id.0, &req).await
}

// 配置路由
pub fn configure_parent_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/parent")
            .wrap(RequireUser)
            .service(
                web::scope("")
                    .wrap(RequireRole::new_any(UserRole::parent_roles()))
                    .route("/children", web::get().to(list_children))
                    .route("/children/{id}/grades", web::get().to(child_grades))
                    .route(
                        "/children/{id}/enrollments",
                        web::get().to(child_enrollments),
                    ),
            ),
    );
}
