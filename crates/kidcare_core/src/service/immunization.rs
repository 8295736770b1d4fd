//! Immunization scheduling.
//!
//! # Responsibility
//! - Decide which dose of each scheduled vaccine is due next.
//! - Append administered doses to a student's history.
//!
//! # Invariants
//! - At most one due dose per vaccine: the lowest dose number not yet
//!   administered.
//! - Due-list order follows schedule definition order.
//! - Reminders are derived values; they never touch history.

use crate::model::vaccination::{
    DueDose, ReminderNotice, VaccinationBook, VaccinationRecord, VaccineDefinition,
};

/// Recommended childhood schedule shipped as reference data.
pub fn default_schedule() -> Vec<VaccineDefinition> {
    vec![
        VaccineDefinition::new("BCG", "BCG", "At birth", 1),
        VaccineDefinition::new("HEPB", "Hepatitis B", "Birth, 6 weeks, 14 weeks", 3),
        VaccineDefinition::new("OPV", "Oral Polio Vaccine", "6, 10, 14 weeks", 3),
        VaccineDefinition::new("DPT", "Diphtheria, Pertussis, Tetanus", "6, 10, 14 weeks", 3),
        VaccineDefinition::new("HIB", "Haemophilus influenzae type b", "6, 10, 14 weeks", 3),
        VaccineDefinition::new("MMR", "Measles, Mumps, Rubella", "9 months, 15 months", 2),
    ]
}

/// True when any history entry matches both vaccine and dose number.
pub fn is_administered(history: &[VaccinationRecord], vaccine_id: &str, dose_number: u32) -> bool {
    history
        .iter()
        .any(|record| record.vaccine_id == vaccine_id && record.dose_number == dose_number)
}

/// Next-due dose for each vaccine that is not yet complete.
pub fn due_list(schedule: &[VaccineDefinition], history: &[VaccinationRecord]) -> Vec<DueDose> {
    schedule
        .iter()
        .filter_map(|vaccine| {
            (1..=vaccine.total_doses)
                .find(|dose| !is_administered(history, &vaccine.vaccine_id, *dose))
                .map(|dose_number| DueDose {
                    vaccine_id: vaccine.vaccine_id.clone(),
                    name: vaccine.name.clone(),
                    recommended_age: vaccine.recommended_age.clone(),
                    dose_number,
                })
        })
        .collect()
}

/// Appends an administered dose. Does not check whether it was due.
pub fn record_dose(
    mut history: Vec<VaccinationRecord>,
    vaccine_id: &str,
    dose_number: u32,
    administered_by: &str,
    date: &str,
) -> Vec<VaccinationRecord> {
    history.push(VaccinationRecord {
        vaccine_id: vaccine_id.to_string(),
        dose_number,
        date: date.to_string(),
        administered_by: administered_by.to_string(),
    });
    history
}

/// History for one student; empty when none recorded.
pub fn history_for<'a>(book: &'a VaccinationBook, student_id: &str) -> &'a [VaccinationRecord] {
    book.histories
        .get(student_id)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Book-level variant of [`record_dose`] for one student.
pub fn record_student_dose(
    mut book: VaccinationBook,
    student_id: &str,
    vaccine_id: &str,
    dose_number: u32,
    administered_by: &str,
    date: &str,
) -> VaccinationBook {
    let history = book.histories.remove(student_id).unwrap_or_default();
    book.histories.insert(
        student_id.to_string(),
        record_dose(history, vaccine_id, dose_number, administered_by, date),
    );
    book
}

pub fn purge_student(mut book: VaccinationBook, student_id: &str) -> VaccinationBook {
    book.histories.remove(student_id);
    book
}

/// Builds the parent-facing reminder text for a due list.
///
/// Returns `None` when nothing is due.
pub fn reminder_notice(student_name: &str, due: &[DueDose]) -> Option<ReminderNotice> {
    if due.is_empty() {
        return None;
    }
    let doses = due
        .iter()
        .map(|dose| format!("{} dose {}", dose.name, dose.dose_number))
        .collect::<Vec<_>>()
        .join(", ");
    Some(ReminderNotice {
        student_name: student_name.to_string(),
        due_count: due.len(),
        text: format!("Reminder: {student_name} is due for {doses}."),
    })
}
