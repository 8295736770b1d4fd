//! Immunization model: administered-dose log and schedule reference data.
//!
//! # Invariants
//! - History is an append-only log; duplicate (vaccine, dose) entries are
//!   permitted and retained.
//! - A dose moves `Due -> Administered` once and is never reverted.
//! - The schedule is static reference data and is never persisted.

use crate::model::student::StudentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One administered dose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRecord {
    pub vaccine_id: String,
    pub dose_number: u32,
    pub date: String,
    pub administered_by: String,
}

/// Vaccination collection keyed by student.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaccinationBook {
    pub histories: BTreeMap<StudentId, Vec<VaccinationRecord>>,
}

impl VaccinationBook {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One vaccine in the recommended schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineDefinition {
    pub vaccine_id: String,
    pub name: String,
    /// Human-readable age label such as `6, 10, 14 weeks`.
    pub recommended_age: String,
    pub total_doses: u32,
}

impl VaccineDefinition {
    pub fn new(
        vaccine_id: impl Into<String>,
        name: impl Into<String>,
        recommended_age: impl Into<String>,
        total_doses: u32,
    ) -> Self {
        Self {
            vaccine_id: vaccine_id.into(),
            name: name.into(),
            recommended_age: recommended_age.into(),
            total_doses,
        }
    }
}

/// Next dose a student still needs for one vaccine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDose {
    pub vaccine_id: String,
    pub name: String,
    pub recommended_age: String,
    pub dose_number: u32,
}

/// Consumer-facing reminder payload built from a due list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotice {
    pub student_name: String,
    pub due_count: usize,
    pub text: String,
}
