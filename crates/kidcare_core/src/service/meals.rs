//! Meal planner and per-student meal log.
//!
//! # Invariants
//! - The daily menu holds one entry per date; writes overwrite.
//! - The meal log is append-only; entries are never merged.
//! - Recency order is date descending, last-inserted first within a date.

use crate::model::meal::{DailyMenu, DailyMenuBook, MealEntry, MealLog};

/// Sets the menu for `date`, replacing any existing entry.
///
/// Callers that must not overwrite check [`is_recorded`] first.
pub fn record_daily_meal(mut days: DailyMenuBook, date: &str, menu: DailyMenu) -> DailyMenuBook {
    days.days.insert(date.to_string(), menu);
    days
}

pub fn is_recorded(days: &DailyMenuBook, date: &str) -> bool {
    days.days.contains_key(date)
}

pub fn daily_menu<'a>(days: &'a DailyMenuBook, date: &str) -> Option<&'a DailyMenu> {
    days.days.get(date)
}

/// Appends one entry to a student's log; no de-duplication.
pub fn append_meal_log_entry(mut log: MealLog, student_id: &str, entry: MealEntry) -> MealLog {
    log.entries
        .entry(student_id.to_string())
        .or_default()
        .push(entry);
    log
}

/// Up to `n` most recent entries for a student.
pub fn recent_meals(log: &MealLog, student_id: &str, n: usize) -> Vec<MealEntry> {
    // Reversing before the stable sort puts later inserts first among ties.
    let mut entries: Vec<MealEntry> = log.entries_for(student_id).iter().rev().cloned().collect();
    entries.sort_by(|left, right| right.date.cmp(&left.date));
    entries.truncate(n);
    entries
}

/// Entries logged for one student on one date, in insertion order.
pub fn meals_on(log: &MealLog, student_id: &str, date: &str) -> Vec<MealEntry> {
    log.entries_for(student_id)
        .iter()
        .filter(|entry| entry.date == date)
        .cloned()
        .collect()
}

pub fn purge_student(mut log: MealLog, student_id: &str) -> MealLog {
    log.entries.remove(student_id);
    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::meal::MealType;

    fn entry(meal_type: MealType, details: &str, date: &str) -> MealEntry {
        MealEntry {
            meal_type,
            meal_details: details.to_string(),
            date: date.to_string(),
        }
    }

    fn menu(special: &str) -> DailyMenu {
        DailyMenu {
            breakfast: "Idli".to_string(),
            lunch: "Rice and dal".to_string(),
            snacks: "Fruit".to_string(),
            special_dish: special.to_string(),
        }
    }

    #[test]
    fn record_daily_meal_overwrites_same_date() {
        let days = record_daily_meal(DailyMenuBook::new(), "2024-05-01", menu("Kheer"));
        assert!(is_recorded(&days, "2024-05-01"));
        assert!(!is_recorded(&days, "2024-05-02"));

        let days = record_daily_meal(days, "2024-05-01", menu("Halwa"));
        assert_eq!(days.days.len(), 1);
        assert_eq!(
            daily_menu(&days, "2024-05-01").map(|m| m.special_dish.as_str()),
            Some("Halwa")
        );
    }

    #[test]
    fn recent_meals_returns_most_recent_n() {
        let log = [
            ("2024-05-01", "a"),
            ("2024-05-04", "b"),
            ("2024-05-02", "c"),
            ("2024-05-05", "d"),
            ("2024-05-03", "e"),
        ]
        .into_iter()
        .fold(MealLog::new(), |log, (date, details)| {
            append_meal_log_entry(log, "s1", entry(MealType::Lunch, details, date))
        });

        let recent = recent_meals(&log, "s1", 3);
        let details: Vec<&str> = recent.iter().map(|e| e.meal_details.as_str()).collect();
        assert_eq!(details, vec!["d", "b", "e"]);
    }

    #[test]
    fn recent_meals_prefers_last_inserted_on_same_date() {
        let log = append_meal_log_entry(
            MealLog::new(),
            "s1",
            entry(MealType::Breakfast, "first", "2024-05-01"),
        );
        let log = append_meal_log_entry(log, "s1", entry(MealType::Snack, "second", "2024-05-01"));

        let recent = recent_meals(&log, "s1", 1);
        assert_eq!(recent[0].meal_details, "second");
    }

    #[test]
    fn append_keeps_duplicates_and_meals_on_filters_by_date() {
        let duplicate = entry(MealType::Lunch, "Rice", "2024-05-01");
        let log = append_meal_log_entry(MealLog::new(), "s1", duplicate.clone());
        let log = append_meal_log_entry(log, "s1", duplicate);
        let log = append_meal_log_entry(log, "s1", entry(MealType::Dinner, "Soup", "2024-05-02"));

        assert_eq!(meals_on(&log, "s1", "2024-05-01").len(), 2);
        assert!(recent_meals(&log, "unknown", 3).is_empty());
    }

    #[test]
    fn purge_student_drops_log() {
        let rice = entry(MealType::Lunch, "Rice", "2024-05-01");
        let log = append_meal_log_entry(MealLog::new(), "s1", rice);
        let log = purge_student(log, "s1");
        assert!(recent_meals(&log, "s1", 5).is_empty());
    }
}
