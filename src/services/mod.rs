//! 业务逻辑层
//!
//! 每个业务模块一个 `XxxService`，由路由层以懒加载单例持有；
//! 具体操作拆分到模块内的独立文件中。

pub mod access;
pub mod accounts;
pub mod announcements;
pub mod assignments;
pub mod attributes;
pub mod catalog;
pub mod enrollments;
pub mod files;
pub mod grading;
pub mod materials;
pub mod messages;
pub mod parents;
pub mod profile;
pub mod quizzes;
pub mod rooms;
pub mod system;

pub use accounts::AccountService;
pub use announcements::AnnouncementService;
pub use assignments::AssignmentService;
pub use attributes::AttributeStore;
pub use catalog::CatalogService;
pub use enrollments::EnrollmentService;
pub use files::FileService;
pub use grading::GradingService;
pub use materials::MaterialService;
pub use messages::MessageService;
pub use parents::ParentService;
pub use profile::ProfileService;
pub use quizzes::QuizService;
pub use rooms::RoomService;
pub use system::SystemService;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::LmsError;
use crate::middlewares::RequireUser;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// 把存储层错误映射为统一响应
///
/// Validation→400，Authorization→403，NotFound→404，Conflict/InvalidState→409，其余 500。
pub(crate) fn error_response(err: &LmsError, code: ErrorCode) -> HttpResponse {
    match err {
        LmsError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg))
        }
        LmsError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(code, msg))
        }
        LmsError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(code, msg))
        }
        LmsError::Conflict(msg) | LmsError::InvalidState(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(code, msg))
        }
        other => {
            error!("{}", other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                other.format_simple(),
            ))
        }
    }
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
}

/// 存储调用结果转为可直接返回的响应
pub(crate) trait OrRespond<T> {
    fn or_respond(self, code: ErrorCode) -> Result<T, HttpResponse>;
}

impl<T> OrRespond<T> for crate::errors::Result<T> {
    fn or_respond(self, code: ErrorCode) -> Result<T, HttpResponse> {
        self.map_err(|e| error_response(&e, code))
    }
}

/// 业务操作的返回值，失败分支同样是一个完整响应
pub(crate) type Reply = Result<HttpResponse, HttpResponse>;

/// 收拢成 handler 返回值
pub(crate) fn respond(reply: Reply) -> actix_web::Result<HttpResponse> {
    Ok(reply.unwrap_or_else(|resp| resp))
}

/// 当前请求的用户，由 RequireUser 写入
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireUser::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unable to identify the current user",
        ))
    })
}

/// 对象缓存（未注册时为 None）
pub(crate) fn request_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 账号状态或资料变更后清除用户缓存
pub(crate) async fn forget_user(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = request_cache(request) {
        cache.remove(&crate::cache::user_key(user_id)).await;
    }
}

/// 去掉首尾空白后不能为空
pub(crate) fn require_text(value: &str, code: ErrorCode, field: &str) -> Result<String, HttpResponse> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(bad_request(code, format!("{field} must not be empty")))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (LmsError::validation("x"), StatusCode::BAD_REQUEST),
            (LmsError::authorization("x"), StatusCode::FORBIDDEN),
            (LmsError::not_found("x"), StatusCode::NOT_FOUND),
            (LmsError::conflict("x"), StatusCode::CONFLICT),
            (LmsError::invalid_state("x"), StatusCode::CONFLICT),
            (LmsError::database_operation("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(&err, ErrorCode::BadRequest).status(), status);
        }
    }

    #[test]
    fn test_require_text_trims() {
        assert_eq!(
            require_text("  Algebra ", ErrorCode::CourseInvalid, "title").unwrap(),
            "Algebra"
        );
        assert!(require_text("   ", ErrorCode::CourseInvalid, "title").is_err());
    }
}
