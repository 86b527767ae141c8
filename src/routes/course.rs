//! 课程目录的公开查询，以及需要课程成员身份的课程内容

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireUser;
use crate::models::catalog::requests::{CourseListParams, OfferedCourseListParams};
use crate::services::{
    AssignmentService, CatalogService, GradingService, MaterialService, QuizService,
};
use crate::utils::SafeIDI64;

static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);
static GRADING_SERVICE: Lazy<GradingService> = Lazy::new(GradingService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn list_departments(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_departments(&req).await
}

pub async fn list_semesters(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_semesters(&req).await
}

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn get_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_course(id.0, &req).await
}

pub async fn list_prerequisites(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_prerequisites(id.0, &req).await
}

pub async fn list_offered_courses(
    req: HttpRequest,
    query: web::Query<OfferedCourseListParams>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .list_offered_courses(query.into_inner(), &req)
        .await
}

pub async fn get_offered_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_offered_course(id.0, &req).await
}

pub async fn list_sections(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_sections(id.0, &req).await
}

pub async fn get_grade_components(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.get_components(id.0, &req).await
}

pub async fn list_assignments(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(id.0, &req).await
}

pub async fn get_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(id.0, &req).await
}

pub async fn list_quizzes(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(id.0, &req).await
}

pub async fn list_materials(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_materials(id.0, &req).await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/course")
            .wrap(middleware::Compress::default())
            .route("/departments", web::get().to(list_departments))
            .route("/semesters", web::get().to(list_semesters))
            .route("/courses", web::get().to(list_courses))
            .route("/courses/{id}", web::get().to(get_course))
            .route(
                "/courses/{id}/prerequisites",
                web::get().to(list_prerequisites),
            )
            .route("/offered-courses", web::get().to(list_offered_courses))
            .route("/offered-courses/{id}", web::get().to(get_offered_course))
            .route(
                "/offered-courses/{id}/sections",
                web::get().to(list_sections),
            )
            .route(
                "/offered-courses/{id}/grade-components",
                web::get().to(get_grade_components),
            )
            // 以下资源只对课程成员开放
            .service(
                web::resource("/offered-courses/{id}/assignments")
                    .wrap(RequireUser)
                    .route(web::get().to(list_assignments)),
            )
            .service(
                web::resource("/offered-courses/{id}/quizzes")
                    .wrap(RequireUser)
                    .route(web::get().to(list_quizzes)),
            )
            .service(
                web::resource("/offered-courses/{id}/materials")
                    .wrap(RequireUser)
                    .route(web::get().to(list_materials)),
            )
            .service(
                web::resource("/assignments/{id}")
                    .wrap(RequireUser)
                    .route(web::get().to(get_assignment)),
            ),
    );
}
