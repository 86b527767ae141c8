use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::attributes::{AttributeMap, AttributeValue};
use crate::models::common::PaginationQuery;
use crate::models::users::entities::UserRole;

/// EAV 属性名
pub const ATTR_SCOPE_OFFERED_COURSE: &str = "scope.offered_course_id";
pub const ATTR_SCOPE_ROLE: &str = "scope.role";

/// 公告可见范围，未设置的维度不做限制
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "announcement.ts")]
pub struct AnnouncementScope {
    pub offered_course_id: Option<i64>,
    pub role: Option<UserRole>,
}

/// 查看者上下文
#[derive(Debug, Clone)]
pub struct Viewer {
    pub role: UserRole,
    /// 学生：已批准选课的开课；教师：所授开课；家长：孩子已批准选课的开课
    pub offering_ids: HashSet<i64>,
}

impl AnnouncementScope {
    pub fn from_attributes(attrs: &AttributeMap) -> Self {
        Self {
            offered_course_id: attrs.get(ATTR_SCOPE_OFFERED_COURSE).and_then(|v| v.as_i64()),
            role: attrs
                .get(ATTR_SCOPE_ROLE)
                .and_then(|v| v.as_text())
                .and_then(|r| r.parse().ok()),
        }
    }

    pub fn to_attributes(&self) -> Vec<(&'static str, AttributeValue)> {
        let mut attrs = Vec::new();
        if let Some(id) = self.offered_course_id {
            attrs.push((ATTR_SCOPE_OFFERED_COURSE, AttributeValue::Integer(id)));
        }
        if let Some(role) = self.role {
            attrs.push((ATTR_SCOPE_ROLE, AttributeValue::Text(role.to_string())));
        }
        attrs
    }

    pub fn is_visible_to(&self, viewer: &Viewer) -> bool {
        if viewer.role == UserRole::Admin {
            return true;
        }
        if let Some(role) = self.role
            && role != viewer.role
        {
            return false;
        }
        if let Some(offering) = self.offered_course_id
            && !viewer.offering_ids.contains(&offering)
        {
            return false;
        }
        true
    }
}

// 公告
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "announcement.ts")]
pub struct Announcement {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub scope: AnnouncementScope,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "announcement.ts")]
pub struct PublishAnnouncementRequest {
    pub title: String,
    pub body: String,
    pub offered_course_id: Option<i64>,
    pub audience_role: Option<UserRole>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "announcement.ts")]
pub struct AnnouncementListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(role: UserRole, offerings: &[i64]) -> Viewer {
        Viewer {
            role,
            offering_ids: offerings.iter().copied().collect(),
        }
    }

    #[test]
    fn test_global_announcement_visible_to_all() {
        let scope = AnnouncementScope::default();
        assert!(scope.is_visible_to(&viewer(UserRole::Student, &[])));
        assert!(scope.is_visible_to(&viewer(UserRole::Parent, &[])));
    }

    #[test]
    fn test_every_present_scope_must_match() {
        let scope = AnnouncementScope {
            offered_course_id: Some(7),
            role: Some(UserRole::Student),
        };
        assert!(scope.is_visible_to(&viewer(UserRole::Student, &[7])));
        assert!(!scope.is_visible_to(&viewer(UserRole::Student, &[8])));
        assert!(!scope.is_visible_to(&viewer(UserRole::Parent, &[7])));
        assert!(scope.is_visible_to(&viewer(UserRole::Admin, &[])));
    }

    #[test]
    fn test_scope_attribute_round_trip() {
        let scope = AnnouncementScope {
            offered_course_id: Some(4),
            role: Some(UserRole::Parent),
        };
        let attrs: AttributeMap = scope
            .to_attributes()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(AnnouncementScope::from_attributes(&attrs), scope);
        assert_eq!(
            AnnouncementScope::from_attributes(&AttributeMap::new()),
            AnnouncementScope::default()
        );
    }

    #[test]
    fn test_course_scope_for_instructor() {
        let scope = AnnouncementScope {
            offered_course_id: Some(3),
            role: None,
        };
        assert!(scope.is_visible_to(&viewer(UserRole::Instructor, &[3])));
        assert!(!scope.is_visible_to(&viewer(UserRole::Instructor, &[])));
    }
}
