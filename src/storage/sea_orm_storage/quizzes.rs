use super::SeaOrmStorage;
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::entity::student_answers::{
    ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as StudentAnswers,
};
use crate::errors::{LmsError, Result};
use crate::models::quizzes::{
    entities::{NewAnswer, Question, Quiz, StudentAnswer},
    requests::{AddQuestionRequest, CreateQuizRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_quiz_impl(
        &self,
        offered_course_id: i64,
        req: CreateQuizRequest,
        created_by: i64,
    ) -> Result<Quiz> {
        let model = ActiveModel {
            offered_course_id: Set(offered_course_id),
            title: Set(req.title),
            description: Set(req.description),
            opens_at: Set(req.opens_at.timestamp()),
            closes_at: Set(req.closes_at.timestamp()),
            time_limit_minutes: Set(req.time_limit_minutes),
            created_by: Set(created_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to create quiz: {e}")))?;
        Ok(result.into_quiz())
    }

    pub async fn get_quiz_impl(&self, id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_quiz()))
    }

    pub async fn list_quizzes_impl(&self, offered_course_id: i64) -> Result<Vec<Quiz>> {
        let result = Quizzes::find()
            .filter(Column::OfferedCourseId.eq(offered_course_id))
            .order_by_asc(Column::OpensAt)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_quiz()).collect())
    }

    /// 追加题目，序号接在已有题目之后
    pub async fn add_question_impl(&self, quiz_id: i64, req: AddQuestionRequest) -> Result<Question> {
        let existing = Questions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .count(&self.db)
            .await?;

        let model = QuestionActiveModel {
            quiz_id: Set(quiz_id),
            kind: Set(req.kind.to_string()),
            prompt: Set(req.prompt),
            options: Set(serde_json::to_string(&req.options)?),
            correct_answer: Set(req.correct_answer),
            points: Set(req.points),
            position: Set(existing as i32 + 1),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to add question: {e}")))?;
        Ok(result.into_question())
    }

    pub async fn get_question_impl(&self, id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_question()))
    }

    pub async fn list_questions_impl(&self, quiz_id: i64) -> Result<Vec<Question>> {
        let result = Questions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .order_by_asc(QuestionColumn::Position)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_question()).collect())
    }

    pub async fn delete_question_impl(&self, id: i64) -> Result<bool> {
        let result = Questions::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn has_submitted_quiz_impl(&self, quiz_id: i64, student_id: i64) -> Result<bool> {
        let count = StudentAnswers::find()
            .filter(AnswerColumn::QuizId.eq(quiz_id))
            .filter(AnswerColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// 整份答卷在一个事务中写入
    pub async fn save_answers_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
        answers: Vec<NewAnswer>,
    ) -> Result<Vec<StudentAnswer>> {
        if answers.is_empty() {
            return Err(LmsError::validation("At least one answer is required"));
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let already = StudentAnswers::find()
            .filter(AnswerColumn::QuizId.eq(quiz_id))
            .filter(AnswerColumn::StudentId.eq(student_id))
            .count(&txn)
            .await?;
        if already > 0 {
            return Err(LmsError::conflict("Quiz has already been submitted"));
        }

        let mut saved = Vec::with_capacity(answers.len());
        for answer in answers {
            let model = AnswerActiveModel {
                quiz_id: Set(quiz_id),
                question_id: Set(answer.question_id),
                student_id: Set(student_id),
                answer: Set(answer.answer),
                is_correct: Set(answer.is_correct),
                points_awarded: Set(answer.points_awarded),
                submitted_at: Set(now),
                graded_by: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to save answer: {e}")))?;
            saved.push(model.into_answer());
        }

        txn.commit().await?;
        Ok(saved)
    }

    pub async fn list_student_answers_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Vec<StudentAnswer>> {
        let result = StudentAnswers::find()
            .filter(AnswerColumn::QuizId.eq(quiz_id))
            .filter(AnswerColumn::StudentId.eq(student_id))
            .order_by_asc(AnswerColumn::QuestionId)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_answer()).collect())
    }

    pub async fn list_quiz_answers_impl(&self, quiz_id: i64) -> Result<Vec<StudentAnswer>> {
        let result = StudentAnswers::find()
            .filter(AnswerColumn::QuizId.eq(quiz_id))
            .order_by_asc(AnswerColumn::StudentId)
            .order_by_asc(AnswerColumn::QuestionId)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_answer()).collect())
    }

    pub async fn get_answer_impl(&self, id: i64) -> Result<Option<StudentAnswer>> {
        let result = StudentAnswers::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_answer()))
    }

    pub async fn grade_answer_impl(
        &self,
        id: i64,
        points: f64,
        graded_by: i64,
    ) -> Result<Option<StudentAnswer>> {
        let Some(existing) = StudentAnswers::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: AnswerActiveModel = existing.into();
        model.points_awarded = Set(Some(points));
        model.is_correct = Set(Some(points > 0.0));
        model.graded_by = Set(Some(graded_by));

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to grade answer: {e}")))?;
        Ok(Some(updated.into_answer()))
    }
}
