//! CLI smoke probe.
//!
//! # Responsibility
//! - Verify `kidcare_core` linkage without any UI shell.
//! - Print a deterministic engine probe over an in-memory store.

use kidcare_core::{
    default_schedule, AttendanceStatus, MemoryRecordStore, NewStudent, RecordsService,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("kidcare_core version={}", kidcare_core::core_version());

    match probe() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("kidcare_core probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn probe() -> Result<(), kidcare_core::ServiceError> {
    let service = RecordsService::new(MemoryRecordStore::new());
    let student = service.enroll_student(NewStudent {
        name: "Probe".to_string(),
        join_date: "2024-01-01".to_string(),
        ..NewStudent::default()
    })?;
    service.mark_attendance("2024-01-02", &student.id, AttendanceStatus::Present)?;

    let stats = service.daily_stats("2024-01-02")?;
    let due = service.due_doses(&student.id, &default_schedule())?;
    println!(
        "kidcare_core probe present={} absent={} percentage={} due_vaccines={}",
        stats.present,
        stats.absent,
        stats.percentage,
        due.len()
    );
    Ok(())
}
