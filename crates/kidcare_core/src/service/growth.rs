//! Growth series builder.
//!
//! # Invariants
//! - Series stay sorted ascending by date; ties keep insertion order.
//! - Chart output mirrors the stored order with no smoothing or gap-filling.

use crate::model::growth::{ChartSeries, GrowthBook, GrowthRecord};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").expect("valid iso date regex"));

/// Appends a measurement, then stable-sorts the series by date.
pub fn add_measurement(mut series: Vec<GrowthRecord>, record: GrowthRecord) -> Vec<GrowthRecord> {
    series.push(record);
    series.sort_by(|left, right| left.date.cmp(&right.date));
    series
}

/// Book-level variant of [`add_measurement`] for one student.
pub fn add_student_measurement(
    mut book: GrowthBook,
    student_id: &str,
    record: GrowthRecord,
) -> GrowthBook {
    let series = book.series.remove(student_id).unwrap_or_default();
    book.series
        .insert(student_id.to_string(), add_measurement(series, record));
    book
}

/// Projects a series into parallel label/height/weight sequences.
pub fn build_chart_series(series: &[GrowthRecord]) -> ChartSeries {
    ChartSeries {
        labels: series.iter().map(|r| format_chart_label(&r.date)).collect(),
        heights: series.iter().map(|r| r.height_cm).collect(),
        weights: series.iter().map(|r| r.weight_kg).collect(),
    }
}

/// Most recent measurement, if any.
pub fn latest_measurement(series: &[GrowthRecord]) -> Option<&GrowthRecord> {
    series.last()
}

pub fn purge_student(mut book: GrowthBook, student_id: &str) -> GrowthBook {
    book.series.remove(student_id);
    book
}

/// `YYYY-MM-DD` becomes `M/D/YYYY`; anything else passes through.
pub fn format_chart_label(date: &str) -> String {
    let Some(caps) = ISO_DATE_RE.captures(date) else {
        return date.to_string();
    };
    let month = caps[2].parse::<u32>().unwrap_or(0);
    let day = caps[3].parse::<u32>().unwrap_or(0);
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return date.to_string();
    }
    format!("{month}/{day}/{}", &caps[1])
}
