use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教室
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub building: Option<String>,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "room.ts")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl ReservationStatus {
    pub fn can_approve(&self) -> bool {
        *self == ReservationStatus::Pending
    }

    pub fn can_reject(&self) -> bool {
        *self == ReservationStatus::Pending
    }

    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Approved
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "pending"),
            ReservationStatus::Approved => write!(f, "approved"),
            ReservationStatus::Rejected => write!(f, "rejected"),
            ReservationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "approved" => Ok(ReservationStatus::Approved),
            "rejected" => Ok(ReservationStatus::Rejected),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Invalid reservation status: {s}")),
        }
    }
}

/// 半开时间区间 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, String> {
        if start >= end {
            return Err("start_at must be earlier than end_at".to_string());
        }
        Ok(Self { start, end })
    }

    /// 首尾相接不算重叠
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

// 教室预约
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "room.ts")]
pub struct Reservation {
    pub id: i64,
    pub room_id: i64,
    pub requested_by: i64,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub purpose: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<i64>,
}

impl Reservation {
    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start_at,
            end: self.end_at,
        }
    }
}

/// 与候选区间冲突的预约
pub fn find_conflicts<'a, I>(candidate: &TimeRange, existing: I) -> Vec<i64>
where
    I: IntoIterator<Item = &'a Reservation>,
{
    existing
        .into_iter()
        .filter(|r| r.range().overlaps(candidate))
        .map(|r| r.id)
        .collect()
}

/// 创建或审批预约的结果，冲突时携带冲突的已批准预约 id
#[derive(Debug, Clone)]
pub enum ReservationOutcome {
    Accepted(Reservation),
    Conflicted(Vec<i64>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
    }

    fn range(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeRange {
        TimeRange::new(at(h1, m1), at(h2, m2)).unwrap()
    }

    fn reservation(id: i64, r: TimeRange) -> Reservation {
        Reservation {
            id,
            room_id: 1,
            requested_by: 1,
            start_at: r.start,
            end_at: r.end,
            purpose: "lecture".into(),
            status: ReservationStatus::Approved,
            created_at: r.start,
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = range(9, 0, 10, 0);
        assert!(a.overlaps(&range(9, 30, 10, 30)));
        assert!(a.overlaps(&range(8, 0, 11, 0)));
        assert!(a.overlaps(&range(9, 15, 9, 45)));
        assert!(!a.overlaps(&range(10, 0, 11, 0)));
        assert!(!a.overlaps(&range(8, 0, 9, 0)));
    }

    #[test]
    fn test_empty_or_inverted_range_rejected() {
        assert!(TimeRange::new(at(9, 0), at(9, 0)).is_err());
        assert!(TimeRange::new(at(10, 0), at(9, 0)).is_err());
    }

    #[test]
    fn test_find_conflicts_collects_ids() {
        let existing = vec![
            reservation(1, range(8, 0, 9, 0)),
            reservation(2, range(9, 30, 10, 30)),
            reservation(3, range(10, 0, 12, 0)),
        ];
        let conflicts = find_conflicts(&range(9, 0, 10, 15), &existing);
        assert_eq!(conflicts, vec![2, 3]);
    }

    #[test]
    fn test_status_guards() {
        assert!(ReservationStatus::Pending.can_approve());
        assert!(!ReservationStatus::Approved.can_approve());
        assert!(ReservationStatus::Approved.can_cancel());
        assert!(!ReservationStatus::Rejected.can_cancel());
        assert!(!ReservationStatus::Cancelled.can_reject());
    }
}
