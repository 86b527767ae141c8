use std::collections::HashMap;
use std::sync::Arc;

use actix_web::HttpResponse;

use crate::models::{
    ErrorCode,
    attributes::{EntityType, to_json_map},
    enrollments::{entities::Enrollment, responses::EnrollmentDetail},
};
use crate::services::{AttributeStore, OrRespond};
use crate::storage::Storage;

/// 为选课记录补全开课、课程与附加属性，保持原有顺序
pub(crate) async fn enrollment_details(
    storage: &Arc<dyn Storage>,
    attributes: &AttributeStore,
    enrollments: Vec<Enrollment>,
) -> Result<Vec<EnrollmentDetail>, HttpResponse> {
    if enrollments.is_empty() {
        return Ok(Vec::new());
    }

    let offered_ids: Vec<i64> = enrollments.iter().map(|e| e.offered_course_id).collect();
    let offerings: HashMap<i64, _> = storage
        .list_offered_courses_by_ids(&offered_ids)
        .await
        .or_respond(ErrorCode::InternalServerError)?
        .into_iter()
        .map(|o| (o.id, o))
        .collect();

    let course_ids: Vec<i64> = offerings.values().map(|o| o.course_id).collect();
    let courses: HashMap<i64, _> = storage
        .get_courses_by_ids(&course_ids)
        .await
        .or_respond(ErrorCode::InternalServerError)?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let enrollment_ids: Vec<i64> = enrollments.iter().map(|e| e.id).collect();
    let mut notes = attributes
        .maps_for(EntityType::Enrollment, &enrollment_ids)
        .await
        .or_respond(ErrorCode::InternalServerError)?;

    Ok(enrollments
        .into_iter()
        .filter_map(|enrollment| {
            let offered_course = offerings.get(&enrollment.offered_course_id)?.clone();
            let course = courses.get(&offered_course.course_id)?.clone();
            let notes = notes
                .remove(&enrollment.id)
                .map(|map| to_json_map(&map))
                .unwrap_or_default();
            Some(EnrollmentDetail {
                enrollment,
                offered_course,
                course,
                notes,
            })
        })
        .collect())
}
