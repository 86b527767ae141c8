//! 路径参数提取器
//!
//! 非法参数在进入 handler 之前就以统一响应返回 400。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_path_param(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 定义正整数路径参数提取器
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                match raw.parse::<i64>() {
                    Ok(id) if id > 0 => ready(Ok($name(id))),
                    _ => ready(Err(bad_path_param(format!(
                        "Invalid path parameter '{}': expected a positive integer",
                        $param
                    )))),
                }
            }
        }
    };
}

/// 定义按校验函数过滤的字符串路径参数提取器
macro_rules! define_safe_string_extractor {
    ($name:ident, $param:literal, $check:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub String);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                let check: fn(&str) -> bool = $check;
                if check(raw) {
                    ready(Ok($name(raw.to_string())))
                } else {
                    ready(Err(bad_path_param(format!(
                        "Invalid path parameter '{}'",
                        $param
                    ))))
                }
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafePrerequisiteIdI64, "prereq_id");

define_safe_string_extractor!(SafeSettingKey, "key", |s| {
    !s.is_empty()
        && s.len() <= 64
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.')
});

define_safe_string_extractor!(SafeFileToken, "token", |s| {
    !s.is_empty() && s.len() <= 64 && s.chars().all(|c| c.is_ascii_alphanumeric())
});

define_safe_string_extractor!(SafeAttributeName, "name", |s| {
    crate::models::attributes::validate_name(s).is_ok()
});

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_positive_id_accepted() {
        let req = TestRequest::default().param("id", "42").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_non_positive_or_garbage_rejected() {
        for raw in ["0", "-3", "abc", ""] {
            let req = TestRequest::default().param("id", raw).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err(), "{raw} accepted");
        }
    }

    #[actix_web::test]
    async fn test_string_extractors() {
        let req = TestRequest::default()
            .param("key", "enrollment.max_credits")
            .to_http_request();
        assert!(SafeSettingKey::extract(&req).await.is_ok());

        let req = TestRequest::default().param("key", "../etc").to_http_request();
        assert!(SafeSettingKey::extract(&req).await.is_err());

        let req = TestRequest::default()
            .param("token", "0f3c9a")
            .to_http_request();
        assert!(SafeFileToken::extract(&req).await.is_ok());

        let req = TestRequest::default().param("name", "Projector").to_http_request();
        assert!(SafeAttributeName::extract(&req).await.is_err());
    }
}
