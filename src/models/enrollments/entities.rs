//! 选课状态机
//!
//! | from         | action       | to           | seat |
//! |--------------|--------------|--------------|------|
//! | pending      | approve      | approved     | +1   |
//! | pending      | reject       | rejected     | 0    |
//! | approved     | request_drop | drop_pending | 0    |
//! | drop_pending | approve      | dropped      | -1   |
//! | drop_pending | reject       | approved     | 0    |

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "enrollment.ts")]
pub enum EnrollmentStatus {
    Pending,
    Approved,
    Rejected,
    DropPending,
    Dropped,
}

impl EnrollmentStatus {
    /// 占用学分/名额的状态
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            EnrollmentStatus::Pending | EnrollmentStatus::Approved | EnrollmentStatus::DropPending
        )
    }

    /// 计入开课已选人数的状态
    pub fn holds_seat(&self) -> bool {
        matches!(
            self,
            EnrollmentStatus::Approved | EnrollmentStatus::DropPending
        )
    }

    /// 等待导师处理的状态
    pub fn awaits_review(&self) -> bool {
        matches!(
            self,
            EnrollmentStatus::Pending | EnrollmentStatus::DropPending
        )
    }

    pub fn active_values() -> Vec<String> {
        [
            EnrollmentStatus::Pending,
            EnrollmentStatus::Approved,
            EnrollmentStatus::DropPending,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// 执行一次状态转换，返回 (新状态, 名额变化)
    pub fn apply(self, action: EnrollmentAction) -> Result<Transition, String> {
        use EnrollmentAction as A;
        use EnrollmentStatus as S;

        let (to, seat_delta) = match (self, action) {
            (S::Pending, A::Approve) => (S::Approved, 1),
            (S::Pending, A::Reject) => (S::Rejected, 0),
            (S::Approved, A::RequestDrop) => (S::DropPending, 0),
            (S::DropPending, A::Approve) => (S::Dropped, -1),
            (S::DropPending, A::Reject) => (S::Approved, 0),
            (from, action) => {
                return Err(format!("Cannot {action} an enrollment in status '{from}'"));
            }
        };
        Ok(Transition { to, seat_delta })
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Approved => "approved",
            EnrollmentStatus::Rejected => "rejected",
            EnrollmentStatus::DropPending => "drop_pending",
            EnrollmentStatus::Dropped => "dropped",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EnrollmentStatus::Pending),
            "approved" => Ok(EnrollmentStatus::Approved),
            "rejected" => Ok(EnrollmentStatus::Rejected),
            "drop_pending" => Ok(EnrollmentStatus::DropPending),
            "dropped" => Ok(EnrollmentStatus::Dropped),
            _ => Err(format!("Invalid enrollment status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentAction {
    Approve,
    Reject,
    RequestDrop,
}

impl std::fmt::Display for EnrollmentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentAction::Approve => write!(f, "approve"),
            EnrollmentAction::Reject => write!(f, "reject"),
            EnrollmentAction::RequestDrop => write!(f, "request drop of"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: EnrollmentStatus,
    pub seat_delta: i32,
}

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub offered_course_id: i64,
    pub section_id: Option<i64>,
    pub status: EnrollmentStatus,
    pub requested_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_by: Option<i64>,
}

/// EAV 属性名
pub const ATTR_DROP_REASON: &str = "drop_reason";
pub const ATTR_REVIEW_NOTE: &str = "review_note";

#[cfg(test)]
mod tests {
    use super::*;
    use EnrollmentAction as A;
    use EnrollmentStatus as S;

    #[test]
    fn test_approve_pending_takes_a_seat() {
        let t = S::Pending.apply(A::Approve).unwrap();
        assert_eq!(t.to, S::Approved);
        assert_eq!(t.seat_delta, 1);
    }

    #[test]
    fn test_drop_cycle() {
        let t = S::Approved.apply(A::RequestDrop).unwrap();
        assert_eq!(t, Transition { to: S::DropPending, seat_delta: 0 });

        let approved = S::DropPending.apply(A::Approve).unwrap();
        assert_eq!(approved, Transition { to: S::Dropped, seat_delta: -1 });

        let rejected = S::DropPending.apply(A::Reject).unwrap();
        assert_eq!(rejected, Transition { to: S::Approved, seat_delta: 0 });
    }

    #[test]
    fn test_drop_requires_approved() {
        for from in [S::Pending, S::Rejected, S::DropPending, S::Dropped] {
            assert!(from.apply(A::RequestDrop).is_err(), "{from} should not allow drop");
        }
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for from in [S::Rejected, S::Dropped] {
            assert!(from.apply(A::Approve).is_err());
            assert!(from.apply(A::Reject).is_err());
        }
        assert!(S::Approved.apply(A::Approve).is_err());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(S::DropPending.to_string(), "drop_pending");
        assert_eq!("drop_pending".parse::<S>().unwrap(), S::DropPending);
        assert!(S::DropPending.is_active());
        assert!(!S::Dropped.is_active());
        assert_eq!(EnrollmentStatus::active_values().len(), 3);
    }

    #[test]
    fn test_seat_holders_match_transition_deltas() {
        // 占座状态恰好是 +1 之后、-1 之前的那些状态
        assert!(S::Approved.holds_seat());
        assert!(S::DropPending.holds_seat());
        for status in [S::Pending, S::Rejected, S::Dropped] {
            assert!(!status.holds_seat(), "{status} should not hold a seat");
        }
    }
}
