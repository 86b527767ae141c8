use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireRole, RequireUser};
use crate::models::assignments::requests::SubmitAssignmentRequest;
use crate::models::enrollments::requests::{DropRequest, EnrollRequest, MyEnrollmentParams};
use crate::models::quizzes::requests::SubmitAnswersRequest;
use crate::models::users::entities::UserRole;
use crate::services::{AssignmentService, EnrollmentService, GradingService, QuizService};
use crate::utils::SafeIDI64;

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);
static GRADING_SERVICE: Lazy<GradingService> = Lazy::new(GradingService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

pub async fn request_enrollment(
    req: HttpRequest,
    body: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .request_enrollment(body.into_inner(), &req)
        .await
}

pub async fn list_my_enrollments(
    req: HttpRequest,
    query: web::Query<MyEnrollmentParams>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_my_enrollments(query.into_inner(), &req)
        .await
}

pub async fn request_drop(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<DropRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .request_drop(id.0, body.into_inner(), &req)
        .await
}

pub async fn get_enrollment_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.enrollment_grade(id.0, &req).await
}

pub async fn get_transcript(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.my_transcript(&req).await
}

pub async fn submit_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit(id.0, body.into_inner(), &req)
        .await
}

pub async fn get_my_submission(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.my_submission(id.0, &req).await
}

pub async fn get_quiz(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(id.0, &req).await
}

pub async fn submit_answers(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<SubmitAnswersRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .submit_answers(id.0, body.into_inner(), &req)
        .await
}

pub async fn get_quiz_result(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.my_result(id.0, &req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/student")
            .wrap(middleware::Compress::default())
            .wrap(RequireUser)
            .service(
                web::scope("")
                    .wrap(RequireRole::new_any(UserRole::student_roles()))
                    .route("/enrollments", web::post().to(request_enrollment))
                    .route("/enrollments", web::get().to(list_my_enrollments))
                    .route("/enrollments/{id}/drop", web::post().to(request_drop))
                    .route(
                        "/enrollments/{id}/grade",
                        web::get().to(get_enrollment_grade),
                    )
                    .route("/grades", web::get().to(get_transcript))
                    .route(
                        "/assignments/{id}/submissions",
                        web::post().to(submit_assignment),
                    )
                    .route(
                        "/assignments/{id}/submission",
                        web::get().to(get_my_submission),
                    )
                    .route("/quizzes/{id}", web::get().to(get_quiz))
                    .route("/quizzes/{id}/answers", web::post().to(submit_answers))
                    .route("/quizzes/{id}/result", web::get().to(get_quiz_result)),
            ),
    );
}
