//! Child record and scheduling engine.
//! This crate owns every derivation over per-child records: attendance
//! rollups, growth series, immunization due lists, meal recency and
//! broadcast recipients.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::attendance::{AttendanceBook, AttendanceStatus, DailyStats, MonthlyTally};
pub use model::growth::{ChartSeries, GrowthBook, GrowthRecord};
pub use model::meal::{DailyMenu, DailyMenuBook, MealEntry, MealLog, MealType};
pub use model::message::{Message, MessageDraft, MessageUrgency};
pub use model::parent::ParentContact;
pub use model::student::{NewStudent, Student, StudentId, StudentValidationError};
pub use model::vaccination::{
    DueDose, ReminderNotice, VaccinationBook, VaccinationRecord, VaccineDefinition,
};
pub use repo::record_store::{
    Collection, CollectionName, MemoryRecordStore, RecordStore, SqliteRecordStore, StoreError,
    StoreResult,
};
pub use service::broadcast::{BroadcastGroup, RecipientSelection};
pub use service::immunization::default_schedule;
pub use service::records_service::{RecordsService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
