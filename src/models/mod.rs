//! 数据模型定义
//!
//! 每个业务模块按 `entities` / `requests` / `responses` 划分，
//! `entities` 中的类型同时承载纯业务规则（状态机、评分、冲突检测等）。

pub mod announcements;
pub mod assignments;
pub mod attributes;
pub mod catalog;
pub mod common;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod materials;
pub mod messages;
pub mod profile;
pub mod quizzes;
pub mod rooms;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 响应中携带的业务错误码
///
/// 1xxx 通用，2xxx 账号与资料，3xxx 课程目录，4xxx 选课，5xxx 成绩，
/// 6xxx 作业/测验/资料，7xxx 文件，8xxx 消息与公告，9xxx 教室/属性/配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    UserNotFound = 2000,
    UserNameInvalid = 2001,
    UserEmailInvalid = 2002,
    UserAlreadyExists = 2003,
    UserCreationFailed = 2004,
    UserRoleInvalid = 2005,
    AccountStateInvalid = 2010,
    StudentProfileNotFound = 2020,
    InstructorProfileNotFound = 2021,
    ProfileChangeInvalid = 2030,
    ProfileChangePending = 2031,
    ProfileChangeNotFound = 2032,

    DepartmentNotFound = 3000,
    DepartmentCodeExists = 3001,
    SemesterNotFound = 3010,
    SemesterInvalid = 3011,
    CourseNotFound = 3020,
    CourseCodeExists = 3021,
    CourseInvalid = 3022,
    PrerequisiteInvalid = 3030,
    PrerequisiteCycle = 3031,
    PrerequisiteExists = 3032,
    OfferedCourseNotFound = 3040,
    OfferedCourseExists = 3041,
    OfferedCourseInvalid = 3042,
    SectionNotFound = 3050,
    SectionInvalid = 3051,

    EnrollmentNotFound = 4000,
    EnrollmentClosed = 4001,
    EnrollmentDuplicate = 4002,
    EnrollmentPrerequisiteMissing = 4003,
    EnrollmentCreditLimit = 4004,
    EnrollmentCourseFull = 4005,
    EnrollmentStateInvalid = 4006,
    EnrollmentNotAdvisor = 4007,

    GradeComponentsInvalid = 5000,
    GradeComponentsMissing = 5001,
    GradeScoreInvalid = 5002,
    GradeNotFound = 5003,

    AssignmentNotFound = 6000,
    AssignmentInvalid = 6001,
    SubmissionNotFound = 6010,
    SubmissionInvalid = 6011,
    SubmissionAlreadyGraded = 6012,
    QuizNotFound = 6020,
    QuizInvalid = 6021,
    QuizNotOpen = 6022,
    QuizAlreadySubmitted = 6023,
    QuestionNotFound = 6030,
    QuestionInvalid = 6031,
    AnswerNotFound = 6040,
    AnswerInvalid = 6041,
    MaterialNotFound = 6050,
    MaterialInvalid = 6051,

    FileNotFound = 7000,
    FileUploadFailed = 7001,
    FileTypeNotAllowed = 7002,
    FileSizeExceeded = 7003,
    MultifileUploadNotAllowed = 7004,

    MessageNotFound = 8000,
    MessageInvalid = 8001,
    MessageNotAllowed = 8002,
    AnnouncementNotFound = 8010,
    AnnouncementInvalid = 8011,

    RoomNotFound = 9000,
    RoomInvalid = 9001,
    RoomNameExists = 9002,
    ReservationNotFound = 9010,
    ReservationInvalid = 9011,
    ReservationConflict = 9012,
    ReservationStateInvalid = 9013,
    AttributeInvalid = 9020,
    AttributeNotFound = 9021,
    SettingNotFound = 9030,
    SettingInvalid = 9031,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.as_i32(), 0);
        assert_eq!(ErrorCode::RateLimitExceeded.as_i32(), 1029);
        assert_eq!(ErrorCode::ReservationConflict.as_i32(), 9012);
        assert_eq!(ErrorCode::EnrollmentStateInvalid as i32, 4006);
    }
}
