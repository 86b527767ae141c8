//! 管理员路由：账号审核、用户、档案变更、课程目录与系统设置

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireRole, RequireUser};
use crate::models::PaginationQuery;
use crate::models::catalog::requests::{
    AddPrerequisiteRequest, CreateCourseRequest, CreateDepartmentRequest,
    CreateOfferedCourseRequest, CreateSectionRequest, CreateSemesterRequest, UpdateCourseRequest,
    UpdateDepartmentRequest, UpdateOfferedCourseRequest,
};
use crate::models::system::requests::UpdateSettingRequest;
use crate::models::users::entities::{AccountAction, UserRole};
use crate::models::users::requests::{
    ApproveAccountRequest, AssignAdvisorRequest, LinkParentRequest, UserListParams,
};
use crate::services::{AccountService, CatalogService, ProfileService, SystemService};
use crate::utils::{SafeIDI64, SafePrerequisiteIdI64, SafeSettingKey};

static ACCOUNT_SERVICE: Lazy<AccountService> = Lazy::new(AccountService::new_lazy);
static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);
static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

// ----- 账号审核 -----

pub async fn list_pending_accounts(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.list_pending(query.into_inner(), &req).await
}

pub async fn approve_account(
    req: HttpRequest,
    user_id: SafeIDI64,
    body: web::Json<ApproveAccountRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .approve(user_id.0, body.into_inner(), &req)
        .await
}

pub async fn reject_account(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .change_status(user_id.0, AccountAction::Reject, &req)
        .await
}

pub async fn suspend_account(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .change_status(user_id.0, AccountAction::Suspend, &req)
        .await
}

pub async fn reactivate_account(
    req: HttpRequest,
    user_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .change_status(user_id.0, AccountAction::Reactivate, &req)
        .await
}

// ----- 用户 -----

pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn get_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.get_user(user_id.0, &req).await
}

pub async fn delete_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.delete_user(user_id.0, &req).await
}

pub async fn assign_advisor(
    req: HttpRequest,
    student_id: SafeIDI64,
    body: web::Json<AssignAdvisorRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .assign_advisor(student_id.0, body.into_inner(), &req)
        .await
}

pub async fn link_parent(
    req: HttpRequest,
    student_id: SafeIDI64,
    body: web::Json<LinkParentRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .link_parent(student_id.0, body.into_inner(), &req)
        .await
}

// ----- 档案变更 -----

pub async fn list_pending_profile_changes(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE
        .list_pending_changes(query.into_inner(), &req)
        .await
}

pub async fn approve_profile_change(
    req: HttpRequest,
    change_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.review_change(change_id.0, true, &req).await
}

pub async fn reject_profile_change(
    req: HttpRequest,
    change_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.review_change(change_id.0, false, &req).await
}

// ----- 课程目录 -----

pub async fn create_department(
    req: HttpRequest,
    body: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_department(body.into_inner(), &req)
        .await
}

pub async fn list_departments(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_departments(&req).await
}

pub async fn get_department(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_department(id.0, &req).await
}

pub async fn update_department(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .update_department(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_department(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.delete_department(id.0, &req).await
}

pub async fn create_semester(
    req: HttpRequest,
    body: web::Json<CreateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.create_semester(body.into_inner(), &req).await
}

pub async fn activate_semester(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.activate_semester(id.0, &req).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.create_course(body.into_inner(), &req).await
}

pub async fn update_course(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .update_course(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.delete_course(id.0, &req).await
}

pub async fn add_prerequisite(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<AddPrerequisiteRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .add_prerequisite(id.0, body.into_inner(), &req)
        .await
}

pub async fn remove_prerequisite(
    req: HttpRequest,
    id: SafeIDI64,
    prereq_id: SafePrerequisiteIdI64,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .remove_prerequisite(id.0, prereq_id.0, &req)
        .await
}

pub async fn create_offered_course(
    req: HttpRequest,
    body: web::Json<CreateOfferedCourseRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_offered_course(body.into_inner(), &req)
        .await
}

pub async fn update_offered_course(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateOfferedCourseRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .update_offered_course(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_offered_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.delete_offered_course(id.0, &req).await
}

pub async fn create_section(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreateSectionRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_section(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_section(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.delete_section(id.0, &req).await
}

// ----- 系统设置 -----

pub async fn list_settings(req: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.list_settings(&req).await
}

pub async fn update_setting(
    req: HttpRequest,
    key: SafeSettingKey,
    body: web::Json<UpdateSettingRequest>,
) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE
        .update_setting(key.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(middleware::Compress::default())
            .wrap(RequireUser)
            .service(
                web::scope("")
                    .wrap(RequireRole::new_any(UserRole::admin_roles()))
                    // 账号
                    .route("/accounts/pending", web::get().to(list_pending_accounts))
                    .route("/accounts/{id}/approve", web::post().to(approve_account))
                    .route("/accounts/{id}/reject", web::post().to(reject_account))
                    .route("/accounts/{id}/suspend", web::post().to(suspend_account))
                    .route(
                        "/accounts/{id}/reactivate",
                        web::post().to(reactivate_account),
                    )
                    .route("/users", web::get().to(list_users))
                    .route("/users/{id}", web::get().to(get_user))
                    .route("/users/{id}", web::delete().to(delete_user))
                    .route("/students/{id}/advisor", web::put().to(assign_advisor))
                    .route("/students/{id}/parent", web::put().to(link_parent))
                    // 档案变更
                    .route(
                        "/profile-changes",
                        web::get().to(list_pending_profile_changes),
                    )
                    .route(
                        "/profile-changes/{id}/approve",
                        web::post().to(approve_profile_change),
                    )
                    .route(
                        "/profile-changes/{id}/reject",
                        web::post().to(reject_profile_change),
                    )
                    // 课程目录
                    .route("/departments", web::post().to(create_department))
                    .route("/departments", web::get().to(list_departments))
                    .route("/departments/{id}", web::get().to(get_department))
                    .route("/departments/{id}", web::put().to(update_department))
                    .route("/departments/{id}", web::delete().to(delete_department))
                    .route("/semesters", web::post().to(create_semester))
                    .route("/semesters/{id}/activate", web::put().to(activate_semester))
                    .route("/courses", web::post().to(create_course))
                    .route("/courses/{id}", web::put().to(update_course))
                    .route("/courses/{id}", web::delete().to(delete_course))
                    .route(
                        "/courses/{id}/prerequisites",
                        web::post().to(add_prerequisite),
                    )
                    .route(
                        "/courses/{id}/prerequisites/{prereq_id}",
                        web::delete().to(remove_prerequisite),
                    )
                    .route("/offered-courses", web::post().to(create_offered_course))
                    .route(
                        "/offered-courses/{id}",
                        web::put().to(update_offered_course),
                    )
                    .route(
                        "/offered-courses/{id}",
                        web::delete().to(delete_offered_course),
                    )
                    .route(
                        "/offered-courses/{id}/sections",
                        web::post().to(create_section),
                    )
                    .route("/sections/{id}", web::delete().to(delete_section))
                    // 系统设置
                    .route("/settings", web::get().to(list_settings))
                    .route("/settings/{key}", web::put().to(update_setting)),
            ),
    );
}
