//! 教师路由（管理员同样可用）：导师审批、成绩、作业、测验、资料与公告

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireRole, RequireUser};
use crate::models::announcements::PublishAnnouncementRequest;
use crate::models::assignments::requests::{
    CreateAssignmentRequest, GradeSubmissionRequest, UpdateAssignmentRequest,
};
use crate::models::enrollments::requests::ReviewRequest;
use crate::models::grades::requests::{RecordScoreRequest, SetComponentsRequest};
use crate::models::materials::CreateMaterialRequest;
use crate::models::quizzes::requests::{AddQuestionRequest, CreateQuizRequest, GradeAnswerRequest};
use crate::models::users::entities::UserRole;
use crate::services::{
    AnnouncementService, AssignmentService, EnrollmentService, GradingService, MaterialService,
    QuizService,
};
use crate::utils::SafeIDI64;

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);
static GRADING_SERVICE: Lazy<GradingService> = Lazy::new(GradingService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);
static ANNOUNCEMENT_SERVICE: Lazy<AnnouncementService> =
    Lazy::new(AnnouncementService::new_lazy);

// ----- 导师审批 -----

pub async fn list_advising_requests(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.list_advising_requests(&req).await
}

pub async fn approve_request(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<ReviewRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .review(id.0, true, body.into_inner(), &req)
        .await
}

pub async fn reject_request(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<ReviewRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .review(id.0, false, body.into_inner(), &req)
        .await
}

pub async fn course_roster(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.roster(id.0, &req).await
}

// ----- 成绩 -----

pub async fn set_grade_components(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<SetComponentsRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .set_components(id.0, body.into_inner(), &req)
        .await
}

pub async fn record_score(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<RecordScoreRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .record_score(id.0, body.into_inner(), &req)
        .await
}

pub async fn finalize_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.finalize(id.0, &req).await
}

pub async fn get_enrollment_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.enrollment_grade(id.0, &req).await
}

// ----- 作业 -----

pub async fn create_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(id.0, body.into_inner(), &req)
        .await
}

pub async fn update_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(id.0, &req).await
}

pub async fn list_submissions(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_submissions(id.0, &req).await
}

pub async fn grade_submission(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .grade_submission(id.0, body.into_inner(), &req)
        .await
}

// ----- 测验 -----

pub async fn create_quiz(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .create_quiz(id.0, body.into_inner(), &req)
        .await
}

pub async fn get_quiz(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(id.0, &req).await
}

pub async fn add_question(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<AddQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .add_question(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_question(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_question(id.0, &req).await
}

pub async fn list_quiz_answers(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_answers(id.0, &req).await
}

pub async fn grade_answer(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<GradeAnswerRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .grade_answer(id.0, body.into_inner(), &req)
        .await
}

// ----- 资料与公告 -----

pub async fn add_material(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .add_material(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_material(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_material(id.0, &req).await
}

pub async fn publish_announcement(
    req: HttpRequest,
    body: web::Json<PublishAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.publish(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_instructor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/instructors")
            .wrap(middleware::Compress::default())
            .wrap(RequireUser)
            .service(
                web::scope("")
                    .wrap(RequireRole::new_any(UserRole::instructor_roles()))
                    .route(
                        "/advising/requests",
                        web::get().to(list_advising_requests),
                    )
                    .route(
                        "/advising/requests/{id}/approve",
                        web::post().to(approve_request),
                    )
                    .route(
                        "/advising/requests/{id}/reject",
                        web::post().to(reject_request),
                    )
                    .route(
                        "/offered-courses/{id}/roster",
                        web::get().to(course_roster),
                    )
                    .route(
                        "/offered-courses/{id}/grade-components",
                        web::put().to(set_grade_components),
                    )
                    .route(
                        "/offered-courses/{id}/assignments",
                        web::post().to(create_assignment),
                    )
                    .route(
                        "/offered-courses/{id}/quizzes",
                        web::post().to(create_quiz),
                    )
                    .route(
                        "/offered-courses/{id}/materials",
                        web::post().to(add_material),
                    )
                    .route("/enrollments/{id}/scores", web::put().to(record_score))
                    .route("/enrollments/{id}/grade", web::post().to(finalize_grade))
                    .route(
                        "/enrollments/{id}/grade",
                        web::get().to(get_enrollment_grade),
                    )
                    .route("/assignments/{id}", web::put().to(update_assignment))
                    .route("/assignments/{id}", web::delete().to(delete_assignment))
                    .route(
                        "/assignments/{id}/submissions",
                        web::get().to(list_submissions),
                    )
                    .route(
                        "/submissions/{id}/grade",
                        web::put().to(grade_submission),
                    )
                    .route("/quizzes/{id}", web::get().to(get_quiz))
                    .route("/quizzes/{id}/questions", web::post().to(add_question))
                    .route("/quizzes/{id}/answers", web::get().to(list_quiz_answers))
                    .route("/questions/{id}", web::delete().to(delete_question))
                    .route("/answers/{id}/grade", web::put().to(grade_answer))
                    .route("/materials/{id}", web::delete().to(delete_material))
                    .route("/announcements", web::post().to(publish_announcement)),
            ),
    );
}
