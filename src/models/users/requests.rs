use super::entities::{UserRole, UserStatus};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 注册请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub department_id: Option<i64>,
}

// 账号审核通过请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct ApproveAccountRequest {
    /// 覆盖注册时申请的院系
    pub department_id: Option<i64>,
    /// 学生的导师（instructors.id）
    pub advisor_id: Option<i64>,
    /// 教师职称
    pub title: Option<String>,
}

// 指定导师请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct AssignAdvisorRequest {
    pub instructor_id: i64,
}

// 关联家长请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct LinkParentRequest {
    pub parent_user_id: i64,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

/// 账号审核通过时写入的档案
#[derive(Debug, Clone)]
pub enum ApprovalProfile {
    Student {
        student_number: String,
        department_id: Option<i64>,
        advisor_id: Option<i64>,
        enrollment_year: i32,
    },
    Instructor {
        department_id: Option<i64>,
        title: Option<String>,
    },
    None,
}

/// 写入 users 表的新用户
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub department_id: Option<i64>,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            full_name: req.full_name.trim().to_string(),
            phone: req.phone.filter(|p| !p.trim().is_empty()),
            role: req.role,
            status: UserStatus::Pending,
            department_id: req.department_id,
        }
    }
}
