//! Child records use-case service.
//!
//! # Responsibility
//! - Wrap each engine operation in load -> derive -> save over a store.
//! - Cascade student removal across every per-student collection.
//!
//! # Invariants
//! - The service never bypasses the pure engine functions.
//! - Every mutating call persists its result before returning.
//! - Log lines carry ids and counts only, never names or free text.

use crate::model::attendance::{AttendanceBook, AttendanceStatus, DailyStats, MonthlyTally};
use crate::model::growth::{ChartSeries, GrowthBook, GrowthRecord};
use crate::model::meal::{DailyMenu, DailyMenuBook, MealEntry, MealLog};
use crate::model::message::{Message, MessageDraft};
use crate::model::parent::ParentContact;
use crate::model::student::{NewStudent, Student, StudentId, StudentValidationError};
use crate::model::vaccination::{DueDose, ReminderNotice, VaccinationBook, VaccineDefinition};
use crate::repo::record_store::{RecordStore, StoreError};
use crate::service::broadcast::RecipientSelection;
use crate::service::{attendance, broadcast, growth, immunization, meals, roster};
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for child-record use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Student input failed validation.
    Validation(StudentValidationError),
    /// Edit or per-student write targeted a student that is not enrolled.
    StudentNotFound(StudentId),
    /// Persistence failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::StudentNotFound(_) => None,
        }
    }
}

impl From<StudentValidationError> for ServiceError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Facade over a record store implementation.
pub struct RecordsService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> RecordsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store, for callers that load collections directly.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ---- roster -------------------------------------------------------

    pub fn students(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.store.load()?)
    }

    /// Enrolls a student and returns the stored record.
    pub fn enroll_student(&self, request: NewStudent) -> ServiceResult<Student> {
        let (students, student) = roster::enroll_student(self.students()?, request)?;
        self.store.save(&students)?;
        info!(
            "event=student_enroll module=service status=ok student_id={} roster_size={}",
            student.id,
            students.len()
        );
        Ok(student)
    }

    /// Replaces field values of an enrolled student.
    pub fn update_student(&self, student: Student) -> ServiceResult<()> {
        student.validate()?;
        let students = self.students()?;
        if roster::find_student(&students, &student.id).is_none() {
            return Err(ServiceError::StudentNotFound(student.id));
        }
        let student_id = student.id.clone();
        self.store.save(&roster::update_student(students, student))?;
        info!("event=student_update module=service status=ok student_id={student_id}");
        Ok(())
    }

    /// Removes a student and purges their per-student records.
    ///
    /// Returns `false` (and writes nothing) when the id is unknown. The
    /// roster entry is dropped last, so a failed purge leaves the student
    /// enrolled and the removal can be retried.
    pub fn remove_student(&self, student_id: &str) -> ServiceResult<bool> {
        let students = self.students()?;
        if roster::find_student(&students, student_id).is_none() {
            info!("event=student_remove module=service status=noop student_id={student_id}");
            return Ok(false);
        }

        self.store
            .save(&attendance::purge_student(self.store.load()?, student_id))?;
        self.store
            .save(&growth::purge_student(self.store.load()?, student_id))?;
        self.store
            .save(&immunization::purge_student(self.store.load()?, student_id))?;
        self.store
            .save(&meals::purge_student(self.store.load()?, student_id))?;
        self.store.save(&roster::remove_student(students, student_id))?;

        info!("event=student_remove module=service status=ok student_id={student_id}");
        Ok(true)
    }

    /// Per-student writes only accept enrolled ids, so nothing is stored
    /// that cascade removal could not reach.
    fn require_enrolled(&self, student_id: &str) -> ServiceResult<()> {
        if roster::find_student(&self.students()?, student_id).is_none() {
            info!("event=student_lookup module=service status=not_found student_id={student_id}");
            return Err(ServiceError::StudentNotFound(student_id.to_string()));
        }
        Ok(())
    }

    // ---- attendance ---------------------------------------------------

    pub fn mark_attendance(
        &self,
        date: &str,
        student_id: &str,
        status: AttendanceStatus,
    ) -> ServiceResult<()> {
        self.require_enrolled(student_id)?;
        let book: AttendanceBook = self.store.load()?;
        self.store
            .save(&attendance::set_status(book, date, student_id, status))?;
        info!(
            "event=attendance_mark module=service status=ok date={date} student_id={student_id} value={status:?}"
        );
        Ok(())
    }

    /// Marks every enrolled student with the same status.
    pub fn mark_all_attendance(
        &self,
        date: &str,
        status: AttendanceStatus,
    ) -> ServiceResult<usize> {
        let students = self.students()?;
        let book: AttendanceBook = self.store.load()?;
        let book = attendance::mark_all(
            book,
            date,
            students.iter().map(|student| student.id.as_str()),
            status,
        );
        self.store.save(&book)?;
        info!(
            "event=attendance_mark_all module=service status=ok date={date} count={} value={status:?}",
            students.len()
        );
        Ok(students.len())
    }

    pub fn attendance_status(
        &self,
        date: &str,
        student_id: &str,
    ) -> ServiceResult<AttendanceStatus> {
        let book: AttendanceBook = self.store.load()?;
        Ok(attendance::get_status(&book, date, student_id))
    }

    /// Daily rollup using the current roster size as the total.
    pub fn daily_stats(&self, date: &str) -> ServiceResult<DailyStats> {
        let total = self.students()?.len();
        let book: AttendanceBook = self.store.load()?;
        Ok(attendance::daily_stats(&book, date, total))
    }

    pub fn monthly_report(
        &self,
        year_month: &str,
    ) -> ServiceResult<BTreeMap<StudentId, MonthlyTally>> {
        let book: AttendanceBook = self.store.load()?;
        Ok(attendance::monthly_report(&book, year_month))
    }

    // ---- growth -------------------------------------------------------

    pub fn add_measurement(&self, student_id: &str, record: GrowthRecord) -> ServiceResult<()> {
        self.require_enrolled(student_id)?;
        let book: GrowthBook = self.store.load()?;
        let book = growth::add_student_measurement(book, student_id, record);
        let count = book.series_for(student_id).len();
        self.store.save(&book)?;
        info!(
            "event=growth_add module=service status=ok student_id={student_id} series_len={count}"
        );
        Ok(())
    }

    pub fn growth_chart(&self, student_id: &str) -> ServiceResult<ChartSeries> {
        let book: GrowthBook = self.store.load()?;
        Ok(growth::build_chart_series(book.series_for(student_id)))
    }

    // ---- immunization -------------------------------------------------

    /// Appends an administered dose; duplicates are not rejected.
    pub fn record_dose(
        &self,
        student_id: &str,
        vaccine_id: &str,
        dose_number: u32,
        administered_by: &str,
        date: &str,
    ) -> ServiceResult<()> {
        self.require_enrolled(student_id)?;
        let book: VaccinationBook = self.store.load()?;
        let book = immunization::record_student_dose(
            book,
            student_id,
            vaccine_id,
            dose_number,
            administered_by,
            date,
        );
        self.store.save(&book)?;
        info!(
            "event=dose_record module=service status=ok student_id={student_id} vaccine_id={vaccine_id} dose={dose_number}"
        );
        Ok(())
    }

    pub fn due_doses(
        &self,
        student_id: &str,
        schedule: &[VaccineDefinition],
    ) -> ServiceResult<Vec<DueDose>> {
        let book: VaccinationBook = self.store.load()?;
        Ok(immunization::due_list(
            schedule,
            immunization::history_for(&book, student_id),
        ))
    }

    /// Reminder for an enrolled student; `None` if unknown or fully vaccinated.
    pub fn vaccination_reminder(
        &self,
        student_id: &str,
        schedule: &[VaccineDefinition],
    ) -> ServiceResult<Option<ReminderNotice>> {
        let students = self.students()?;
        let Some(student) = roster::find_student(&students, student_id) else {
            return Ok(None);
        };
        let due = self.due_doses(student_id, schedule)?;
        Ok(immunization::reminder_notice(&student.name, &due))
    }

    // ---- meals --------------------------------------------------------

    pub fn record_daily_meal(&self, date: &str, menu: DailyMenu) -> ServiceResult<()> {
        let days: DailyMenuBook = self.store.load()?;
        let overwrite = meals::is_recorded(&days, date);
        self.store.save(&meals::record_daily_meal(days, date, menu))?;
        info!(
            "event=daily_meal_record module=service status=ok date={date} overwrite={overwrite}"
        );
        Ok(())
    }

    pub fn is_meal_recorded(&self, date: &str) -> ServiceResult<bool> {
        let days: DailyMenuBook = self.store.load()?;
        Ok(meals::is_recorded(&days, date))
    }

    pub fn daily_menu(&self, date: &str) -> ServiceResult<Option<DailyMenu>> {
        let days: DailyMenuBook = self.store.load()?;
        Ok(meals::daily_menu(&days, date).cloned())
    }

    pub fn log_meal(&self, student_id: &str, entry: MealEntry) -> ServiceResult<()> {
        self.require_enrolled(student_id)?;
        let log: MealLog = self.store.load()?;
        let meal_type = entry.meal_type;
        self.store
            .save(&meals::append_meal_log_entry(log, student_id, entry))?;
        info!(
            "event=meal_log module=service status=ok student_id={student_id} meal_type={meal_type:?}"
        );
        Ok(())
    }

    pub fn recent_meals(&self, student_id: &str, n: usize) -> ServiceResult<Vec<MealEntry>> {
        let log: MealLog = self.store.load()?;
        Ok(meals::recent_meals(&log, student_id, n))
    }

    // ---- messaging ----------------------------------------------------

    pub fn parent_contacts(&self) -> ServiceResult<Vec<ParentContact>> {
        Ok(self.store.load()?)
    }

    /// Replaces the parent contact roster.
    pub fn save_parent_contacts(&self, parents: Vec<ParentContact>) -> ServiceResult<()> {
        self.store.save(&parents)?;
        info!(
            "event=parents_save module=service status=ok count={}",
            parents.len()
        );
        Ok(())
    }

    pub fn messages(&self) -> ServiceResult<Vec<Message>> {
        Ok(self.store.load()?)
    }

    /// Resolves recipients, composes the message and prepends it.
    pub fn broadcast(
        &self,
        draft: MessageDraft,
        selection: &RecipientSelection,
        date: &str,
    ) -> ServiceResult<Message> {
        let parents = self.parent_contacts()?;
        let ids = broadcast::resolve_recipients(&parents, selection);
        let recipients = broadcast::recipient_names(&parents, &ids);
        let message = broadcast::compose_message(draft, recipients, date);

        let messages = broadcast::post_message(self.messages()?, message.clone());
        self.store.save(&messages)?;
        info!(
            "event=message_broadcast module=service status=ok message_id={} recipients={}",
            message.id,
            message.sent_to.len()
        );
        Ok(message)
    }
}
