use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};

use super::FileService;
use crate::config::AppConfig;
use crate::errors::LmsError;
use crate::models::ErrorCode;
use crate::models::{ApiResponse, files::responses::FileUploadResponse};
use crate::services::{current_user, system::DynamicConfig};
use crate::utils::file_magic::{extension_of, normalize_extension};
use crate::utils::random_code::generate_download_token;
use crate::utils::validate_magic_bytes;

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 目录来自配置文件，大小与类型限制来自动态配置
    let upload_dir = AppConfig::get().upload_dir().to_string();
    let max_size = DynamicConfig::upload_max_size().await;
    let allowed_types: Vec<String> = DynamicConfig::upload_allowed_types()
        .await
        .iter()
        .map(|t| normalize_extension(t))
        .collect();

    if !Path::new(&upload_dir).exists()
        && let Err(e) = fs::create_dir_all(&upload_dir)
    {
        tracing::error!("{}", LmsError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "Failed to create upload directory",
            )),
        );
    }

    let mut original_name = String::new();
    let mut file_size: i64 = 0;
    let mut file_uploaded = false;
    let mut file_type = String::new();
    let mut stored_name = String::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if file_uploaded {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }
        file_uploaded = true;

        original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let extension = match extension_of(&original_name) {
            Some(ext) if allowed_types.contains(&ext) => ext,
            _ => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "File type not allowed",
                )));
            }
        };

        // MIME 类型只作记录，不参与校验
        file_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        stored_name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), uuid::Uuid::new_v4());
        let file_path = format!("{upload_dir}/{stored_name}");
        let mut f = match File::create(&file_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("{}", LmsError::file_operation(format!("{e}")));
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::<()>::error_empty(
                        ErrorCode::FileUploadFailed,
                        "Failed to create file",
                    ),
                ));
            }
        };

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = chunk?;

            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    )));
                }
            }

            total_size += data.len();
            if total_size > max_size {
                let _ = fs::remove_file(&file_path);
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                )));
            }
            if let Err(e) = f.write_all(&data) {
                tracing::error!("{}", LmsError::file_operation(format!("{e}")));
                let _ = fs::remove_file(&file_path);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "Failed to write file"),
                ));
            }
        }
        file_size = total_size as i64;
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    }

    let storage = service.get_storage(req);
    let token = generate_download_token();

    match storage
        .upload_file(
            &token,
            &original_name,
            &stored_name,
            file_size,
            &file_type,
            user.id,
        )
        .await
    {
        Ok(file) => Ok(HttpResponse::Created().json(ApiResponse::success(
            FileUploadResponse {
                download_token: file.download_token,
                file_name: file.original_name,
                size: file.file_size,
                content_type: file.file_type,
                created_at: file.created_at,
            },
            "File uploaded successfully",
        ))),
        Err(e) => {
            let _ = fs::remove_file(format!("{upload_dir}/{stored_name}"));
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    format!("Failed to upload file: {e}"),
                )),
            )
        }
    }
}
