use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

/// 主题最大长度
pub const MAX_SUBJECT_LEN: usize = 200;

// 站内信
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub subject: String,
    pub body: String,
    pub sent_at: chrono::DateTime<chrono::Utc>,
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Message {
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }
}

/// 收发双方的家庭关系
#[derive(Debug, Clone, Copy, Default)]
pub struct Kinship {
    /// 接收者是发送者（学生）的家长
    pub recipient_is_parent_of_sender: bool,
    /// 接收者是发送者（家长）的孩子
    pub recipient_is_child_of_sender: bool,
}

/// 发信权限矩阵
pub fn can_message(sender: UserRole, recipient: UserRole, kinship: Kinship) -> bool {
    use UserRole::*;
    match (sender, recipient) {
        (Admin, _) => true,
        (Instructor, _) => true,
        (Student, Instructor | Admin) => true,
        (Student, Parent) => kinship.recipient_is_parent_of_sender,
        (Parent, Instructor | Admin) => true,
        (Parent, Student) => kinship.recipient_is_child_of_sender,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use UserRole::*;

    #[test]
    fn test_admin_and_instructor_reach_everyone() {
        for r in [Admin, Instructor, Student, Parent] {
            assert!(can_message(Admin, r, Kinship::default()));
            assert!(can_message(Instructor, r, Kinship::default()));
        }
    }

    #[test]
    fn test_student_parent_requires_link() {
        assert!(!can_message(Student, Parent, Kinship::default()));
        assert!(can_message(
            Student,
            Parent,
            Kinship {
                recipient_is_parent_of_sender: true,
                ..Default::default()
            }
        ));
        assert!(!can_message(Student, Student, Kinship::default()));
    }

    #[test]
    fn test_parent_child_requires_link() {
        assert!(can_message(Parent, Instructor, Kinship::default()));
        assert!(!can_message(Parent, Student, Kinship::default()));
        assert!(can_message(
            Parent,
            Student,
            Kinship {
                recipient_is_child_of_sender: true,
                ..Default::default()
            }
        ));
        assert!(!can_message(Parent, Parent, Kinship::default()));
    }
}
