use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserRole {
    Admin,      // 管理员
    Instructor, // 教师
    Student,    // 学生
    Parent,     // 家长
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const INSTRUCTOR: &'static str = "instructor";
    pub const STUDENT: &'static str = "student";
    pub const PARENT: &'static str = "parent";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn instructor_roles() -> &'static [&'static UserRole] {
        &[&Self::Instructor, &Self::Admin]
    }
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student]
    }
    pub fn parent_roles() -> &'static [&'static UserRole] {
        &[&Self::Parent]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Instructor, &Self::Student, &Self::Parent]
    }

    /// 允许自助注册的角色
    pub fn can_self_register(&self) -> bool {
        !matches!(self, UserRole::Admin)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: admin, instructor, student, parent"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Instructor => write!(f, "{}", UserRole::INSTRUCTOR),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Parent => write!(f, "{}", UserRole::PARENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::INSTRUCTOR => Ok(UserRole::Instructor),
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::PARENT => Ok(UserRole::Parent),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 账号状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserStatus {
    Pending,   // 待审核
    Active,    // 正常
    Rejected,  // 已拒绝
    Suspended, // 已停用
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的账号状态: '{s}'. 支持的状态: pending, active, rejected, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Pending => write!(f, "pending"),
            UserStatus::Active => write!(f, "active"),
            UserStatus::Rejected => write!(f, "rejected"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(UserStatus::Pending),
            "active" => Ok(UserStatus::Active),
            "rejected" => Ok(UserStatus::Rejected),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

/// 账号审核动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Approve,
    Reject,
    Suspend,
    Reactivate,
}

impl AccountAction {
    /// 计算审核动作后的状态，非法转换返回 None
    pub fn apply(self, from: UserStatus) -> Option<UserStatus> {
        match (from, self) {
            (UserStatus::Pending, AccountAction::Approve) => Some(UserStatus::Active),
            (UserStatus::Pending, AccountAction::Reject) => Some(UserStatus::Rejected),
            (UserStatus::Active, AccountAction::Suspend) => Some(UserStatus::Suspended),
            (UserStatus::Suspended, AccountAction::Reactivate) => Some(UserStatus::Active),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountAction::Approve => write!(f, "approve"),
            AccountAction::Reject => write!(f, "reject"),
            AccountAction::Suspend => write!(f, "suspend"),
            AccountAction::Reactivate => write!(f, "reactivate"),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    /// 注册时申请的院系
    pub department_id: Option<i64>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub approved_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub student_number: String,
    pub department_id: Option<i64>,
    /// 导师（instructors.id）
    pub advisor_id: Option<i64>,
    /// 关联的家长账号（users.id）
    pub parent_user_id: Option<i64>,
    pub enrollment_year: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct Instructor {
    pub id: i64,
    pub user_id: i64,
    pub department_id: Option<i64>,
    pub title: Option<String>,
    pub office: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_strings() {
        for role in UserRole::all_roles() {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(&parsed, *role);
        }
        assert!("teacher".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_admin_cannot_self_register() {
        assert!(!UserRole::Admin.can_self_register());
        assert!(UserRole::Student.can_self_register());
        assert!(UserRole::Parent.can_self_register());
    }

    #[test]
    fn test_account_transitions() {
        assert_eq!(
            AccountAction::Approve.apply(UserStatus::Pending),
            Some(UserStatus::Active)
        );
        assert_eq!(
            AccountAction::Reject.apply(UserStatus::Pending),
            Some(UserStatus::Rejected)
        );
        assert_eq!(AccountAction::Approve.apply(UserStatus::Active), None);
        assert_eq!(AccountAction::Approve.apply(UserStatus::Rejected), None);
        assert_eq!(
            AccountAction::Suspend.apply(UserStatus::Active),
            Some(UserStatus::Suspended)
        );
        assert_eq!(
            AccountAction::Reactivate.apply(UserStatus::Suspended),
            Some(UserStatus::Active)
        );
        assert_eq!(AccountAction::Reactivate.apply(UserStatus::Pending), None);
    }

    #[test]
    fn test_status_deserialize_rejects_unknown() {
        let ok: UserStatus = serde_json::from_str("\"suspended\"").unwrap();
        assert_eq!(ok, UserStatus::Suspended);
        assert!(serde_json::from_str::<UserStatus>("\"inactive\"").is_err());
    }
}
