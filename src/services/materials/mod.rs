//! 课程资料

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode, materials::CreateMaterialRequest};
use crate::services::{
    OrRespond, Reply, access, current_user, not_found, require_text, respond,
};
use crate::storage::Storage;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
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

    pub async fn add_material(
        &self,
        offered_course_id: i64,
        req: CreateMaterialRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(self.add(offered_course_id, req, request).await)
    }

    pub async fn list_materials(
        &self,
        offered_course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(self.list(offered_course_id, request).await)
    }

    pub async fn delete_material(
        &self,
        material_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(self.delete(material_id, request).await)
    }

    /// 资料引用已上传的文件
    async fn add(
        &self,
        offered_course_id: i64,
        mut req: CreateMaterialRequest,
        request: &HttpRequest,
    ) -> Reply {
        let user = current_user(request)?;
        let storage = self.get_storage(request);
        access::offering_for_staff(&storage, offered_course_id, &user).await?;

        req.title = require_text(&req.title, ErrorCode::MaterialInvalid, "title")?;
        access::uploaded_file(&storage, &req.file_token, ErrorCode::MaterialInvalid).await?;

        let material = storage
            .create_material(offered_course_id, req, user.id)
            .await
            .or_respond(ErrorCode::MaterialInvalid)?;
        Ok(HttpResponse::Created().json(ApiResponse::success(material, "Material added")))
    }

    async fn list(&self, offered_course_id: i64, request: &HttpRequest) -> Reply {
        let user = current_user(request)?;
        let storage = self.get_storage(request);
        access::course_member(&storage, offered_course_id, &user).await?;

        let materials = storage
            .list_materials(offered_course_id)
            .await
            .or_respond(ErrorCode::InternalServerError)?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            materials,
            "Materials retrieved successfully",
        )))
    }

    async fn delete(&self, material_id: i64, request: &HttpRequest) -> Reply {
        let user = current_user(request)?;
        let storage = self.get_storage(request);

        let material = storage
            .get_material(material_id)
            .await
            .or_respond(ErrorCode::MaterialNotFound)?
            .ok_or_else(|| not_found(ErrorCode::MaterialNotFound, "Material not found"))?;
        access::offering_for_staff(&storage, material.offered_course_id, &user).await?;

        storage
            .delete_material(material_id)
            .await
            .or_respond(ErrorCode::InternalServerError)?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Material deleted")))
    }
}
