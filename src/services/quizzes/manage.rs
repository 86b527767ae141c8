use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};

use super::QuizService;
use crate::models::{
    ApiResponse, ErrorCode,
    quizzes::{
        entities::{Quiz, validate_question},
        requests::{AddQuestionRequest, CreateQuizRequest},
        responses::QuizDetailResponse,
    },
};
use crate::services::{
    OrRespond, Reply, access, access::Membership, bad_request, conflict, current_user, not_found,
    require_text,
};
use crate::storage::Storage;

pub(crate) async fn load_quiz(
    storage: &Arc<dyn Storage>,
    quiz_id: i64,
) -> Result<Quiz, HttpResponse> {
    storage
        .get_quiz(quiz_id)
        .await
        .or_respond(ErrorCode::QuizNotFound)?
        .ok_or_else(|| not_found(ErrorCode::QuizNotFound, "Quiz not found"))
}

pub async fn create_quiz(
    service: &QuizService,
    offered_course_id: i64,
    mut req: CreateQuizRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    access::offering_for_staff(&storage, offered_course_id, &user).await?;

    req.title = require_text(&req.title, ErrorCode::QuizInvalid, "title")?;
    if req.opens_at >= req.closes_at {
        return Err(bad_request(
            ErrorCode::QuizInvalid,
            "opens_at must be before closes_at",
        ));
    }
    if req.time_limit_minutes.is_some_and(|m| m <= 0) {
        return Err(bad_request(
            ErrorCode::QuizInvalid,
            "time_limit_minutes must be positive",
        ));
    }

    let quiz = storage
        .create_quiz(offered_course_id, req, user.id)
        .await
        .or_respond(ErrorCode::QuizInvalid)?;
    Ok(HttpResponse::Created().json(ApiResponse::success(quiz, "Quiz created")))
}

pub async fn list_quizzes(
    service: &QuizService,
    offered_course_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    access::course_member(&storage, offered_course_id, &user).await?;

    let quizzes = storage
        .list_quizzes(offered_course_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        quizzes,
        "Quizzes retrieved successfully",
    )))
}

/// 教师看到参考答案；学生在开放前看不到题目，之后只看到去掉答案的题目
pub async fn get_quiz(service: &QuizService, quiz_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let quiz = load_quiz(&storage, quiz_id).await?;
    let (_, membership) = access::course_member(&storage, quiz.offered_course_id, &user).await?;

    let questions = storage
        .list_questions(quiz_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    let questions = match membership {
        Membership::Staff => questions,
        Membership::Student(_) => {
            if chrono::Utc::now() < quiz.opens_at {
                return Err(conflict(ErrorCode::QuizNotOpen, "Quiz has not opened yet"));
            }
            questions.into_iter().map(|q| q.without_answer()).collect()
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        QuizDetailResponse { quiz, questions },
        "Quiz retrieved successfully",
    )))
}

pub async fn add_question(
    service: &QuizService,
    quiz_id: i64,
    mut req: AddQuestionRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let quiz = load_quiz(&storage, quiz_id).await?;
    access::offering_for_staff(&storage, quiz.offered_course_id, &user).await?;

    req.prompt = require_text(&req.prompt, ErrorCode::QuestionInvalid, "prompt")?;
    validate_question(req.kind, &req.options, req.correct_answer.as_deref(), req.points)
        .map_err(|msg| bad_request(ErrorCode::QuestionInvalid, msg))?;

    let question = storage
        .add_question(quiz_id, req)
        .await
        .or_respond(ErrorCode::QuestionInvalid)?;
    Ok(HttpResponse::Created().json(ApiResponse::success(question, "Question added")))
}

pub async fn delete_question(
    service: &QuizService,
    question_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let question = storage
        .get_question(question_id)
        .await
        .or_respond(ErrorCode::QuestionNotFound)?
        .ok_or_else(|| not_found(ErrorCode::QuestionNotFound, "Question not found"))?;
    let quiz = load_quiz(&storage, question.quiz_id).await?;
    access::offering_for_staff(&storage, quiz.offered_course_id, &user).await?;

    storage
        .delete_question(question_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Question deleted")))
}
