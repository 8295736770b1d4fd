//! Meal models: per-student meal log and per-day menu summary.
//!
//! The two shapes coexist and are queried differently.

use crate::model::student::StudentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Meal slot for a logged entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

/// One logged meal for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub meal_type: MealType,
    pub meal_details: String,
    pub date: String,
}

/// Append-only meal log keyed by student.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealLog {
    pub entries: BTreeMap<StudentId, Vec<MealEntry>>,
}

impl MealLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries_for(&self, student_id: &str) -> &[MealEntry] {
        self.entries
            .get(student_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Day-level menu written by the meal planner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyMenu {
    pub breakfast: String,
    pub lunch: String,
    pub snacks: String,
    pub special_dish: String,
}

/// Single-slot-per-date menu collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyMenuBook {
    pub days: BTreeMap<String, DailyMenu>,
}

impl DailyMenuBook {
    pub fn new() -> Self {
        Self::default()
    }
}
