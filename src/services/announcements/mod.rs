//! 公告发布与按可见范围筛选

pub mod feed;
pub mod publish;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::announcements::{AnnouncementListParams, PublishAnnouncementRequest};
use crate::services::respond;
use crate::storage::Storage;

pub struct AnnouncementService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnnouncementService {
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

    pub async fn publish(
        &self,
        req: PublishAnnouncementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(publish::publish(self, req, request).await)
    }

    pub async fn list(
        &self,
        params: AnnouncementListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(feed::list(self, params, request).await)
    }

    pub async fn delete(
        &self,
        announcement_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(publish::delete(self, announcement_id, request).await)
    }
}
