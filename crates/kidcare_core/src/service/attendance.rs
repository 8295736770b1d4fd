//! Attendance aggregation.
//!
//! # Responsibility
//! - Record per-day statuses with overwrite semantics.
//! - Derive daily and monthly rollups.
//!
//! # Invariants
//! - Daily stats count unrecorded students as absent.
//! - Monthly reports exclude unrecorded days from the denominator.
//! - The two policies stay in separate functions and must not be unified.

use crate::model::attendance::{
    rounded_percentage, AttendanceBook, AttendanceStatus, DailyStats, MonthlyTally,
};
use crate::model::student::StudentId;
use std::collections::BTreeMap;

/// Sets the status for (date, student), replacing any earlier value.
pub fn set_status(
    mut book: AttendanceBook,
    date: &str,
    student_id: &str,
    status: AttendanceStatus,
) -> AttendanceBook {
    book.days
        .entry(date.to_string())
        .or_default()
        .insert(student_id.to_string(), status);
    book
}

/// Applies one status to every listed student for `date`.
pub fn mark_all<'a, I>(
    book: AttendanceBook,
    date: &str,
    student_ids: I,
    status: AttendanceStatus,
) -> AttendanceBook
where
    I: IntoIterator<Item = &'a str>,
{
    student_ids
        .into_iter()
        .fold(book, |book, student_id| {
            set_status(book, date, student_id, status)
        })
}

/// Recorded status for display; unrecorded reads as `Absent`.
pub fn get_status(book: &AttendanceBook, date: &str, student_id: &str) -> AttendanceStatus {
    book.day(date)
        .and_then(|day| day.get(student_id))
        .copied()
        .unwrap_or(AttendanceStatus::Absent)
}

/// Rollup for one date over `total_students` enrolled children.
///
/// `absent` is `total - present`, so unrecorded students count as absent.
pub fn daily_stats(book: &AttendanceBook, date: &str, total_students: usize) -> DailyStats {
    let present = book
        .day(date)
        .map(|day| {
            day.values()
                .filter(|status| **status == AttendanceStatus::Present)
                .count()
        })
        .unwrap_or(0);

    DailyStats {
        present,
        absent: total_students.saturating_sub(present),
        total: total_students,
        percentage: rounded_percentage(present, total_students),
    }
}

/// Per-student tallies for dates starting with `year_month` (`YYYY-MM`).
///
/// Only explicitly recorded days count; students with no recorded day in
/// the month are absent from the result.
pub fn monthly_report(
    book: &AttendanceBook,
    year_month: &str,
) -> BTreeMap<StudentId, MonthlyTally> {
    let mut report: BTreeMap<StudentId, MonthlyTally> = BTreeMap::new();

    for (_, day) in book
        .days
        .iter()
        .filter(|(date, _)| date.starts_with(year_month))
    {
        for (student_id, status) in day {
            let tally = report.entry(student_id.clone()).or_default();
            tally.total += 1;
            if *status == AttendanceStatus::Present {
                tally.present += 1;
            }
        }
    }

    report
}

/// Dates holding at least one recorded status, ascending.
pub fn recorded_dates(book: &AttendanceBook) -> Vec<String> {
    book.days
        .iter()
        .filter(|(_, day)| !day.is_empty())
        .map(|(date, _)| date.clone())
        .collect()
}

/// Removes `student_id` from every date; dates left empty are dropped.
pub fn purge_student(mut book: AttendanceBook, student_id: &str) -> AttendanceBook {
    for day in book.days.values_mut() {
        day.remove(student_id);
    }
    book.days.retain(|_, day| !day.is_empty());
    book
}
