//! Growth measurement model.
//!
//! # Invariants
//! - Each student's series is sorted ascending by `date` after every insert.
//! - Several measurements on the same date are all retained.

use crate::model::student::StudentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One height/weight measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    pub date: String,
    pub height_cm: f64,
    pub weight_kg: f64,
}

/// Growth collection keyed by student.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrowthBook {
    pub series: BTreeMap<StudentId, Vec<GrowthRecord>>,
}

impl GrowthBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measurements for `student_id`; empty when none were taken.
    pub fn series_for(&self, student_id: &str) -> &[GrowthRecord] {
        self.series
            .get(student_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Chart-ready projection of one student's series.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub heights: Vec<f64>,
    pub weights: Vec<f64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
