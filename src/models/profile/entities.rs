use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 可申请修改的资料字段
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "profile.ts")]
pub enum ProfileField {
    Email,
    FullName,
    Phone,
}

impl ProfileField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Email => "email",
            ProfileField::FullName => "full_name",
            ProfileField::Phone => "phone",
        }
    }
}

impl std::str::FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(ProfileField::Email),
            "full_name" => Ok(ProfileField::FullName),
            "phone" => Ok(ProfileField::Phone),
            _ => Err(format!("Invalid profile field: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "profile.ts")]
pub enum ProfileChangeStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ProfileChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileChangeStatus::Pending => write!(f, "pending"),
            ProfileChangeStatus::Approved => write!(f, "approved"),
            ProfileChangeStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ProfileChangeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProfileChangeStatus::Pending),
            "approved" => Ok(ProfileChangeStatus::Approved),
            "rejected" => Ok(ProfileChangeStatus::Rejected),
            _ => Err(format!("Invalid profile change status: {s}")),
        }
    }
}

/// 待审核的资料修改
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct ProfileChange {
    pub id: i64,
    pub user_id: i64,
    pub field: ProfileField,
    pub old_value: Option<String>,
    pub new_value: String,
    pub status: ProfileChangeStatus,
    pub requested_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub reviewed_by: Option<i64>,
}
