//! 测验、题目与作答

pub mod answers;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::quizzes::requests::{
    AddQuestionRequest, CreateQuizRequest, GradeAnswerRequest, SubmitAnswersRequest,
};
use crate::services::respond;
use crate::storage::Storage;

pub struct QuizService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuizService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_quiz(
        &self,
        offered_course_id: i64,
        req: CreateQuizRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(manage::create_quiz(self, offered_course_id, req, request).await)
    }

    pub async fn list_quizzes(
        &self,
        offered_course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(manage::list_quizzes(self, offered_course_id, request).await)
    }

    pub async fn get_quiz(&self, quiz_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(manage::get_quiz(self, quiz_id, request).await)
    }

    pub async fn add_question(
        &self,
        quiz_id: i64,
        req: AddQuestionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(manage::add_question(self, quiz_id, req, request).await)
    }

    pub async fn delete_question(
        &self,
        question_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(manage::delete_question(self, question_id, request).await)
    }

    pub async fn submit_answers(
        &self,
        quiz_id: i64,
        req: SubmitAnswersRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(answers::submit_answers(self, quiz_id, req, request).await)
    }

    pub async fn my_result(&self, quiz_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(answers::my_result(self, quiz_id, request).await)
    }

    pub async fn list_answers(
        &self,
        quiz_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(answers::list_answers(self, quiz_id, request).await)
    }

    pub async fn grade_answer(
        &self,
        answer_id: i64,
        req: GradeAnswerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(answers::grade_answer(self, answer_id, req, request).await)
    }
}
