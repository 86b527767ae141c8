use std::collections::{HashMap, HashSet};

use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::{QuizService, manage::load_quiz};
use crate::models::{
    ApiResponse, ErrorCode,
    quizzes::{
        entities::{NewAnswer, Question},
        requests::{AnswerItem, GradeAnswerRequest, SubmitAnswersRequest},
        responses::QuizResultResponse,
    },
};
use crate::services::{
    OrRespond, Reply, access, bad_request, conflict, current_user, error_response, not_found,
};

/// 题号必须属于该测验且不重复，返回判分后的答案
///
/// 空答卷不写入任何行，会让"只能提交一次"失效，因此直接拒绝。
fn grade_submission(
    questions: &[Question],
    items: Vec<AnswerItem>,
) -> Result<Vec<NewAnswer>, String> {
    if items.is_empty() {
        return Err("At least one answer is required".to_string());
    }

    let by_id: HashMap<i64, &Question> = questions.iter().map(|q| (q.id, q)).collect();
    let mut seen = HashSet::new();
    let mut answers = Vec::with_capacity(items.len());

    for item in items {
        let Some(question) = by_id.get(&item.question_id) else {
            return Err(format!(
                "Question {} does not belong to this quiz",
                item.question_id
            ));
        };
        if !seen.insert(item.question_id) {
            return Err(format!("Question {} answered twice", item.question_id));
        }

        let graded = question.auto_grade(&item.answer);
        answers.push(NewAnswer {
            question_id: item.question_id,
            answer: item.answer,
            is_correct: graded.map(|(correct, _)| correct),
            points_awarded: graded.map(|(_, points)| points),
        });
    }
    Ok(answers)
}

/// 每名学生只能提交一次
pub async fn submit_answers(
    service: &QuizService,
    quiz_id: i64,
    req: SubmitAnswersRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let quiz = load_quiz(&storage, quiz_id).await?;
    let student = access::student_profile(&storage, &user).await?;
    access::enrolled_in(&storage, student.id, quiz.offered_course_id).await?;

    if !quiz.is_open_at(chrono::Utc::now()) {
        return Err(conflict(
            ErrorCode::QuizNotOpen,
            "Quiz is not open for answers",
        ));
    }
    if storage
        .has_submitted_quiz(quiz_id, student.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?
    {
        return Err(conflict(
            ErrorCode::QuizAlreadySubmitted,
            "Quiz has already been submitted",
        ));
    }

    let questions = storage
        .list_questions(quiz_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    let answers = grade_submission(&questions, req.answers)
        .map_err(|msg| bad_request(ErrorCode::AnswerInvalid, msg))?;

    let saved = storage
        .save_answers(quiz_id, student.id, answers)
        .await
        .map_err(|e| error_response(&e, ErrorCode::QuizAlreadySubmitted))?;

    info!("Student {} submitted quiz {}", student.id, quiz_id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        QuizResultResponse::tally(quiz_id, &questions, saved),
        "Answers submitted",
    )))
}

pub async fn my_result(service: &QuizService, quiz_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    load_quiz(&storage, quiz_id).await?;
    let student = access::student_profile(&storage, &user).await?;

    let answers = storage
        .list_student_answers(quiz_id, student.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    if answers.is_empty() {
        return Err(not_found(
            ErrorCode::AnswerNotFound,
            "Quiz has not been submitted",
        ));
    }
    let questions = storage
        .list_questions(quiz_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        QuizResultResponse::tally(quiz_id, &questions, answers),
        "Quiz result retrieved successfully",
    )))
}

pub async fn list_answers(service: &QuizService, quiz_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let quiz = load_quiz(&storage, quiz_id).await?;
    access::offering_for_staff(&storage, quiz.offered_course_id, &user).await?;

    let answers = storage
        .list_quiz_answers(quiz_id)
        .await
        .or_respond(ErrorCode::InternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        answers,
        "Answers retrieved successfully",
    )))
}

/// 人工评分，分值不超过该题满分
pub async fn grade_answer(
    service: &QuizService,
    answer_id: i64,
    req: GradeAnswerRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let answer = storage
        .get_answer(answer_id)
        .await
        .or_respond(ErrorCode::AnswerNotFound)?
        .ok_or_else(|| not_found(ErrorCode::AnswerNotFound, "Answer not found"))?;
    let quiz = load_quiz(&storage, answer.quiz_id).await?;
    access::offering_for_staff(&storage, quiz.offered_course_id, &user).await?;

    let question = storage
        .get_question(answer.question_id)
        .await
        .or_respond(ErrorCode::QuestionNotFound)?
        .ok_or_else(|| not_found(ErrorCode::QuestionNotFound, "Question not found"))?;
    if !(0.0..=question.points).contains(&req.points) {
        return Err(bad_request(
            ErrorCode::GradeScoreInvalid,
            format!("Points must be between 0 and {}", question.points),
        ));
    }

    let graded = storage
        .grade_answer(answer_id, req.points, user.id)
        .await
        .or_respond(ErrorCode::InternalServerError)?
        .ok_or_else(|| not_found(ErrorCode::AnswerNotFound, "Answer not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(graded, "Answer graded")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::QuestionKind;

    fn question(id: i64, kind: QuestionKind, correct: Option<&str>) -> Question {
        Question {
            id,
            quiz_id: 1,
            kind,
            prompt: "?".into(),
            options: vec!["a".into(), "b".into()],
            correct_answer: correct.map(String::from),
            points: 2.0,
            position: id as i32,
        }
    }

    fn item(question_id: i64, answer: &str) -> AnswerItem {
        AnswerItem {
            question_id,
            answer: answer.into(),
        }
    }

    #[test]
    fn test_grade_submission_marks_open_questions_pending() {
        let questions = vec![
            question(1, QuestionKind::MultipleChoice, Some("a")),
            question(2, QuestionKind::ShortAnswer, None),
        ];
        let answers = grade_submission(&questions, vec![item(1, "a"), item(2, "essay")]).unwrap();
        assert_eq!(answers[0].points_awarded, Some(2.0));
        assert_eq!(answers[1].points_awarded, None);
        assert_eq!(answers[1].is_correct, None);
    }

    #[test]
    fn test_grade_submission_rejects_foreign_and_duplicate_questions() {
        let questions = vec![question(1, QuestionKind::TrueFalse, Some("true"))];
        assert!(grade_submission(&questions, vec![item(9, "true")]).is_err());
        assert!(grade_submission(&questions, vec![item(1, "true"), item(1, "false")]).is_err());
    }

    #[test]
    fn test_grade_submission_rejects_empty_answer_sheet() {
        let questions = vec![question(1, QuestionKind::TrueFalse, Some("true"))];
        assert!(grade_submission(&questions, Vec::new()).is_err());
    }
}
