//! Attendance domain model.
//!
//! # Invariants
//! - At most one status per (date, student); writes overwrite.
//! - A missing (date, student) entry means "unrecorded", which is distinct
//!   from `Absent`.

use crate::model::student::StudentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recorded attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Statuses recorded for one date, keyed by student id.
pub type DayAttendance = BTreeMap<StudentId, AttendanceStatus>;

/// Whole attendance collection: `date -> (student -> status)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceBook {
    pub days: BTreeMap<String, DayAttendance>,
}

impl AttendanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries recorded for `date`, if any.
    pub fn day(&self, date: &str) -> Option<&DayAttendance> {
        self.days.get(date)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Attendance rollup for one date across the enrolled roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyStats {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
    pub percentage: u32,
}

/// Per-student monthly ratio over explicitly recorded days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthlyTally {
    pub present: usize,
    /// Number of recorded days, not days in the month.
    pub total: usize,
}

impl MonthlyTally {
    /// Rounded attendance percentage; `0` when nothing was recorded.
    pub fn percentage(&self) -> u32 {
        rounded_percentage(self.present, self.total)
    }
}

/// `round(part / whole * 100)`, guarding `whole == 0`.
pub(crate) fn rounded_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
