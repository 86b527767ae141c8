//! 院系、学期、课程、先修关系、开课与教学班

pub mod courses;
pub mod departments;
pub mod offerings;
pub mod prerequisites;
pub mod sections;
pub mod semesters;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::catalog::requests::{
    AddPrerequisiteRequest, CourseListParams, CreateCourseRequest, CreateDepartmentRequest,
    CreateOfferedCourseRequest, CreateSectionRequest, CreateSemesterRequest,
    OfferedCourseListParams, UpdateCourseRequest, UpdateDepartmentRequest,
    UpdateOfferedCourseRequest,
};
use crate::services::respond;
use crate::storage::Storage;

pub struct CatalogService {
    storage: Option<Arc<dyn Storage>>,
}

impl CatalogService {
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

    // 院系

    pub async fn create_department(
        &self,
        req: CreateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(departments::create_department(self, req, request).await)
    }

    pub async fn list_departments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(departments::list_departments(self, request).await)
    }

    pub async fn get_department(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(departments::get_department(self, id, request).await)
    }

    pub async fn update_department(
        &self,
        id: i64,
        req: UpdateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(departments::update_department(self, id, req, request).await)
    }

    pub async fn delete_department(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(departments::delete_department(self, id, request).await)
    }

    // 学期

    pub async fn create_semester(
        &self,
        req: CreateSemesterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(semesters::create_semester(self, req, request).await)
    }

    pub async fn list_semesters(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(semesters::list_semesters(self, request).await)
    }

    pub async fn activate_semester(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(semesters::activate_semester(self, id, request).await)
    }

    // 课程

    pub async fn create_course(
        &self,
        req: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(courses::create_course(self, req, request).await)
    }

    pub async fn list_courses(
        &self,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(courses::list_courses(self, query, request).await)
    }

    pub async fn get_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(courses::get_course(self, id, request).await)
    }

    pub async fn update_course(
        &self,
        id: i64,
        req: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(courses::update_course(self, id, req, request).await)
    }

    pub async fn delete_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(courses::delete_course(self, id, request).await)
    }

    // 先修关系

    pub async fn list_prerequisites(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(prerequisites::list_prerequisites(self, course_id, request).await)
    }

    pub async fn add_prerequisite(
        &self,
        course_id: i64,
        req: AddPrerequisiteRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(prerequisites::add_prerequisite(self, course_id, req, request).await)
    }

    pub async fn remove_prerequisite(
        &self,
        course_id: i64,
        prerequisite_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(prerequisites::remove_prerequisite(self, course_id, prerequisite_id, request).await)
    }

    // 开课

    pub async fn create_offered_course(
        &self,
        req: CreateOfferedCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(offerings::create_offered_course(self, req, request).await)
    }

    pub async fn list_offered_courses(
        &self,
        query: OfferedCourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(offerings::list_offered_courses(self, query, request).await)
    }

    pub async fn get_offered_course(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(offerings::get_offered_course(self, id, request).await)
    }

    pub async fn update_offered_course(
        &self,
        id: i64,
        req: UpdateOfferedCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(offerings::update_offered_course(self, id, req, request).await)
    }

    pub async fn delete_offered_course(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(offerings::delete_offered_course(self, id, request).await)
    }

    // 教学班

    pub async fn create_section(
        &self,
        offered_course_id: i64,
        req: CreateSectionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(sections::create_section(self, offered_course_id, req, request).await)
    }

    pub async fn list_sections(
        &self,
        offered_course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond(sections::list_sections(self, offered_course_id, request).await)
    }

    pub async fn delete_section(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(sections::delete_section(self, id, request).await)
    }
}
