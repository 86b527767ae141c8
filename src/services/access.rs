//! 跨模块共用的身份与归属校验
//!
//! 每个函数返回 `Result<_, HttpResponse>`，失败时的响应可直接返回给客户端。

use std::sync::Arc;

use actix_web::HttpResponse;

use super::{OrRespond, forbidden, not_found};
use crate::models::{
    ErrorCode,
    catalog::entities::OfferedCourse,
    enrollments::entities::{Enrollment, EnrollmentStatus},
    users::entities::{Instructor, Student, User},
};
use crate::storage::Storage;

/// 当前用户的学生档案
pub(crate) async fn student_profile(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<Student, HttpResponse> {
    storage
        .get_student_by_user_id(user.id)
        .await
        .or_respond(ErrorCode::StudentProfileNotFound)?
        .ok_or_else(|| {
            forbidden(
                ErrorCode::StudentProfileNotFound,
                "Current user has no student profile",
            )
        })
}

/// 当前用户的教师档案
pub(crate) async fn instructor_profile(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<Instructor, HttpResponse> {
    storage
        .get_instructor_by_user_id(user.id)
        .await
        .or_respond(ErrorCode::InstructorProfileNotFound)?
        .ok_or_else(|| {
            forbidden(
                ErrorCode::InstructorProfileNotFound,
                "Current user has no instructor profile",
            )
        })
}

pub(crate) async fn offered_course(
    storage: &Arc<dyn Storage>,
    offered_course_id: i64,
) -> Result<OfferedCourse, HttpResponse> {
    storage
        .get_offered_course(offered_course_id)
        .await
        .or_respond(ErrorCode::OfferedCourseNotFound)?
        .ok_or_else(|| not_found(ErrorCode::OfferedCourseNotFound, "Offered course not found"))
}

/// 开课存在，且当前用户是管理员或该课授课教师
pub(crate) async fn offering_for_staff(
    storage: &Arc<dyn Storage>,
    offered_course_id: i64,
    user: &User,
) -> Result<OfferedCourse, HttpResponse> {
    let offering = offered_course(storage, offered_course_id).await?;
    if user.is_admin() {
        return Ok(offering);
    }

    let teaches = storage
        .get_instructor_by_user_id(user.id)
        .await
        .or_respond(ErrorCode::InstructorProfileNotFound)?
        .is_some_and(|instructor| instructor.id == offering.instructor_id);
    if teaches {
        Ok(offering)
    } else {
        Err(forbidden(
            ErrorCode::Forbidden,
            "Only the course instructor or an admin can do this",
        ))
    }
}

/// 学生在该开课中处于已选状态（approved 或退课待审）
pub(crate) async fn enrolled_in(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    offered_course_id: i64,
) -> Result<Enrollment, HttpResponse> {
    storage
        .find_active_enrollment(student_id, offered_course_id)
        .await
        .or_respond(ErrorCode::EnrollmentNotFound)?
        .filter(|e| {
            matches!(
                e.status,
                EnrollmentStatus::Approved | EnrollmentStatus::DropPending
            )
        })
        .ok_or_else(|| forbidden(ErrorCode::Forbidden, "You are not enrolled in this course"))
}

/// 课程成员身份
pub(crate) enum Membership {
    Staff,
    Student(Student),
}

/// 管理员、授课教师或已选该课的学生
pub(crate) async fn course_member(
    storage: &Arc<dyn Storage>,
    offered_course_id: i64,
    user: &User,
) -> Result<(OfferedCourse, Membership), HttpResponse> {
    let offering = offered_course(storage, offered_course_id).await?;
    if user.is_admin() {
        return Ok((offering, Membership::Staff));
    }

    if let Some(instructor) = storage
        .get_instructor_by_user_id(user.id)
        .await
        .or_respond(ErrorCode::InstructorProfileNotFound)?
        && instructor.id == offering.instructor_id
    {
        return Ok((offering, Membership::Staff));
    }

    let student = student_profile(storage, user)
        .await
        .map_err(|_| forbidden(ErrorCode::Forbidden, "You are not a member of this course"))?;
    enrolled_in(storage, student.id, offered_course_id).await?;
    Ok((offering, Membership::Student(student)))
}

/// 引用的文件令牌必须已上传
pub(crate) async fn uploaded_file(
    storage: &Arc<dyn Storage>,
    token: &str,
    code: ErrorCode,
) -> Result<crate::models::files::entities::File, HttpResponse> {
    storage
        .get_file_by_token(token)
        .await
        .or_respond(ErrorCode::FileNotFound)?
        .ok_or_else(|| super::bad_request(code, format!("File '{token}' does not exist")))
}
