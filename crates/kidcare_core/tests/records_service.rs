use kidcare_core::db::open_db_in_memory;
use kidcare_core::{
    default_schedule, AttendanceStatus, BroadcastGroup, CollectionName, DailyMenu, GrowthRecord,
    MealEntry, MealType, MemoryRecordStore, MessageDraft, MessageUrgency, MonthlyTally,
    NewStudent, ParentContact, RecipientSelection, RecordStore, RecordsService, ServiceError,
    SqliteRecordStore, StoreError, StoreResult, StudentValidationError, VaccineDefinition,
};
use std::cell::Cell;

fn enroll<S: kidcare_core::RecordStore>(service: &RecordsService<S>, name: &str) -> String {
    service
        .enroll_student(NewStudent {
            name: name.to_string(),
            age: Some(4),
            gender: None,
            join_date: "2024-01-15".to_string(),
        })
        .unwrap()
        .id
}

fn measurement(date: &str, height_cm: f64, weight_kg: f64) -> GrowthRecord {
    GrowthRecord {
        date: date.to_string(),
        height_cm,
        weight_kg,
    }
}

fn lunch(details: &str, date: &str) -> MealEntry {
    MealEntry {
        meal_type: MealType::Lunch,
        meal_details: details.to_string(),
        date: date.to_string(),
    }
}

#[test]
fn daily_stats_partition_the_roster() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordsService::new(SqliteRecordStore::new(&conn));
    let ids: Vec<String> = ["Ravi", "Mia", "Omar", "Zoe"]
        .into_iter()
        .map(|name| enroll(&service, name))
        .collect();

    service
        .mark_attendance("2024-05-01", &ids[0], AttendanceStatus::Present)
        .unwrap();
    service
        .mark_attendance("2024-05-01", &ids[1], AttendanceStatus::Absent)
        .unwrap();
    service
        .mark_attendance("2024-05-01", &ids[2], AttendanceStatus::Present)
        .unwrap();

    let stats = service.daily_stats("2024-05-01").unwrap();
    assert_eq!(stats.present, 2);
    assert_eq!(stats.absent, 2);
    assert_eq!(stats.present + stats.absent, stats.total);
    assert_eq!(stats.percentage, 50);

    assert_eq!(
        service.attendance_status("2024-05-01", &ids[3]).unwrap(),
        AttendanceStatus::Absent
    );
}

#[test]
fn per_student_writes_reject_unenrolled_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordsService::new(SqliteRecordStore::new(&conn));
    let id = enroll(&service, "Ravi");
    service
        .mark_attendance("2024-05-01", &id, AttendanceStatus::Absent)
        .unwrap();

    for ghost in ["ghost1", "ghost2"] {
        let err = service
            .mark_attendance("2024-05-01", ghost, AttendanceStatus::Present)
            .unwrap_err();
        assert!(matches!(err, ServiceError::StudentNotFound(missing) if missing == ghost));
    }
    assert!(matches!(
        service.add_measurement("ghost1", measurement("2024-05-01", 100.0, 15.0)),
        Err(ServiceError::StudentNotFound(_))
    ));
    assert!(matches!(
        service.record_dose("ghost1", "OPV", 1, "Clinic", "2024-05-01"),
        Err(ServiceError::StudentNotFound(_))
    ));
    assert!(matches!(
        service.log_meal("ghost1", lunch("rice", "2024-05-01")),
        Err(ServiceError::StudentNotFound(_))
    ));

    let stats = service.daily_stats("2024-05-01").unwrap();
    assert_eq!(stats.present, 0);
    assert_eq!(stats.present + stats.absent, stats.total);
    assert_eq!(stats.total, 1);
    assert_eq!(stats.percentage, 0);

    assert!(!service.monthly_report("2024-05").unwrap().contains_key("ghost1"));
    assert!(service.growth_chart("ghost1").unwrap().is_empty());
    assert!(service.recent_meals("ghost1", 5).unwrap().is_empty());
    assert_eq!(
        service.due_doses("ghost1", &default_schedule()).unwrap().len(),
        default_schedule().len()
    );
}

#[test]
fn daily_stats_without_students_is_zero_percent() {
    let service = RecordsService::new(MemoryRecordStore::new());
    let stats = service.daily_stats("2024-05-01").unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.percentage, 0);
}

#[test]
fn monthly_report_ignores_unrecorded_days() {
    let service = RecordsService::new(MemoryRecordStore::new());
    let id = enroll(&service, "Ravi");

    service
        .mark_attendance("2024-05-01", &id, AttendanceStatus::Present)
        .unwrap();
    service
        .mark_attendance("2024-05-03", &id, AttendanceStatus::Absent)
        .unwrap();
    service
        .mark_attendance("2024-04-30", &id, AttendanceStatus::Present)
        .unwrap();

    let report = service.monthly_report("2024-05").unwrap();
    assert_eq!(report[&id], MonthlyTally { present: 1, total: 2 });
    assert_eq!(report[&id].percentage(), 50);
}

#[test]
fn mark_all_attendance_covers_enrolled_roster() {
    let service = RecordsService::new(MemoryRecordStore::new());
    enroll(&service, "Ravi");
    enroll(&service, "Mia");

    let marked = service
        .mark_all_attendance("2024-05-06", AttendanceStatus::Present)
        .unwrap();
    assert_eq!(marked, 2);
    assert_eq!(service.daily_stats("2024-05-06").unwrap().percentage, 100);
}

#[test]
fn growth_chart_is_sorted_regardless_of_insert_order() {
    let service = RecordsService::new(MemoryRecordStore::new());
    let id = enroll(&service, "Mia");

    service
        .add_measurement(&id, measurement("2024-01-10", 96.0, 14.2))
        .unwrap();
    service
        .add_measurement(&id, measurement("2024-01-05", 95.5, 14.0))
        .unwrap();

    let chart = service.growth_chart(&id).unwrap();
    assert_eq!(chart.labels, vec!["1/5/2024", "1/10/2024"]);
    assert_eq!(chart.heights, vec![95.5, 96.0]);
    assert_eq!(chart.weights, vec![14.0, 14.2]);
}

#[test]
fn due_doses_advance_one_dose_at_a_time() {
    let service = RecordsService::new(MemoryRecordStore::new());
    let id = enroll(&service, "Omar");
    let schedule = vec![VaccineDefinition::new("OPV", "Oral Polio Vaccine", "6, 10, 14 weeks", 3)];

    service
        .record_dose(&id, "OPV", 1, "Nurse Ana", "2024-02-01")
        .unwrap();
    let due = service.due_doses(&id, &schedule).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].vaccine_id, "OPV");
    assert_eq!(due[0].dose_number, 2);

    service
        .record_dose(&id, "OPV", 2, "Nurse Ana", "2024-03-01")
        .unwrap();
    service
        .record_dose(&id, "OPV", 3, "Nurse Ana", "2024-04-01")
        .unwrap();
    assert!(service.due_doses(&id, &schedule).unwrap().is_empty());
    assert!(service.vaccination_reminder(&id, &schedule).unwrap().is_none());
}

#[test]
fn vaccination_reminder_does_not_record_anything() {
    let service = RecordsService::new(MemoryRecordStore::new());
    let id = enroll(&service, "Zoe");
    let schedule = default_schedule();

    let before = service.due_doses(&id, &schedule).unwrap();
    let notice = service.vaccination_reminder(&id, &schedule).unwrap().unwrap();
    assert_eq!(notice.due_count, schedule.len());
    assert_eq!(service.due_doses(&id, &schedule).unwrap(), before);
}

#[test]
fn daily_menu_overwrite_is_detectable() {
    let service = RecordsService::new(MemoryRecordStore::new());
    assert!(!service.is_meal_recorded("2024-05-01").unwrap());

    let menu = DailyMenu {
        breakfast: "Poha".to_string(),
        lunch: "Khichdi".to_string(),
        snacks: "Apple".to_string(),
        special_dish: "Payasam".to_string(),
    };
    service.record_daily_meal("2024-05-01", menu.clone()).unwrap();
    assert!(service.is_meal_recorded("2024-05-01").unwrap());

    let replaced = DailyMenu {
        special_dish: "Ladoo".to_string(),
        ..menu
    };
    service.record_daily_meal("2024-05-01", replaced.clone()).unwrap();
    assert_eq!(service.daily_menu("2024-05-01").unwrap(), Some(replaced));
}

#[test]
fn recent_meals_returns_three_most_recent_of_five() {
    let service = RecordsService::new(MemoryRecordStore::new());
    let id = enroll(&service, "Ravi");
    for (details, date) in [
        ("rice", "2024-05-02"),
        ("pasta", "2024-05-05"),
        ("soup", "2024-05-01"),
        ("dal", "2024-05-04"),
        ("roti", "2024-05-03"),
    ] {
        service.log_meal(&id, lunch(details, date)).unwrap();
    }

    let recent = service.recent_meals(&id, 3).unwrap();
    let dates: Vec<&str> = recent.iter().map(|m| m.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-05-05", "2024-05-04", "2024-05-03"]);
}

#[test]
fn removing_student_purges_every_collection() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordsService::new(SqliteRecordStore::new(&conn));
    let gone = enroll(&service, "Ravi");
    let kept = enroll(&service, "Mia");
    let schedule = vec![VaccineDefinition::new("OPV", "Oral Polio Vaccine", "6, 10, 14 weeks", 3)];

    for id in [&gone, &kept] {
        service
            .mark_attendance("2024-05-01", id, AttendanceStatus::Present)
            .unwrap();
        service
            .add_measurement(id, measurement("2024-05-01", 100.0, 15.0))
            .unwrap();
        service
            .record_dose(id, "OPV", 1, "Clinic", "2024-05-01")
            .unwrap();
        service.log_meal(id, lunch("rice", "2024-05-01")).unwrap();
    }

    assert!(service.remove_student(&gone).unwrap());

    assert!(!service.monthly_report("2024-05").unwrap().contains_key(&gone));
    assert!(service.growth_chart(&gone).unwrap().is_empty());
    assert!(service.recent_meals(&gone, 5).unwrap().is_empty());
    // History is gone, so the schedule starts over from dose 1.
    assert_eq!(service.due_doses(&gone, &schedule).unwrap()[0].dose_number, 1);
    assert!(service.vaccination_reminder(&gone, &schedule).unwrap().is_none());
    assert!(service.students().unwrap().iter().all(|s| s.id != gone));

    assert_eq!(service.monthly_report("2024-05").unwrap()[&kept].total, 1);
    assert_eq!(service.growth_chart(&kept).unwrap().labels.len(), 1);
    assert_eq!(service.due_doses(&kept, &schedule).unwrap()[0].dose_number, 2);
    assert_eq!(service.recent_meals(&kept, 5).unwrap().len(), 1);
}

/// Memory store whose writes to one collection fail while `failing` is set.
struct FailingWrites {
    inner: MemoryRecordStore,
    target: CollectionName,
    failing: Cell<bool>,
}

impl RecordStore for FailingWrites {
    fn read_raw(&self, name: CollectionName) -> StoreResult<Option<String>> {
        self.inner.read_raw(name)
    }

    fn write_raw(&self, name: CollectionName, payload: &str) -> StoreResult<()> {
        if self.failing.get() && name == self.target {
            return Err(StoreError::InvalidData {
                collection: name.as_str(),
                message: "write rejected".to_string(),
            });
        }
        self.inner.write_raw(name, payload)
    }
}

#[test]
fn failed_purge_keeps_student_enrolled_until_retry() {
    let store = FailingWrites {
        inner: MemoryRecordStore::new(),
        target: CollectionName::MealLog,
        failing: Cell::new(false),
    };
    let service = RecordsService::new(&store);
    let id = enroll(&service, "Ravi");
    service
        .mark_attendance("2024-05-01", &id, AttendanceStatus::Present)
        .unwrap();
    service.log_meal(&id, lunch("rice", "2024-05-01")).unwrap();

    store.failing.set(true);
    assert!(matches!(
        service.remove_student(&id),
        Err(ServiceError::Store(StoreError::InvalidData { .. }))
    ));
    assert_eq!(service.students().unwrap().len(), 1);
    assert_eq!(service.recent_meals(&id, 5).unwrap().len(), 1);

    store.failing.set(false);
    assert!(service.remove_student(&id).unwrap());
    assert!(service.students().unwrap().is_empty());
    assert!(service.recent_meals(&id, 5).unwrap().is_empty());
    assert!(!service.monthly_report("2024-05").unwrap().contains_key(&id));
}

#[test]
fn removing_unknown_student_changes_nothing() {
    let service = RecordsService::new(MemoryRecordStore::new());
    let id = enroll(&service, "Ravi");
    service
        .mark_attendance("2024-05-01", &id, AttendanceStatus::Present)
        .unwrap();

    assert!(!service.remove_student("ghost").unwrap());
    assert_eq!(service.students().unwrap().len(), 1);
    assert_eq!(service.daily_stats("2024-05-01").unwrap().present, 1);
}

#[test]
fn update_student_validates_and_requires_enrollment() {
    let service = RecordsService::new(MemoryRecordStore::new());
    let id = enroll(&service, "Ravi");
    let mut student = service.students().unwrap().remove(0);

    student.age = Some(5);
    service.update_student(student.clone()).unwrap();
    assert_eq!(service.students().unwrap()[0].age, Some(5));

    student.name = "  ".to_string();
    let err = service.update_student(student.clone()).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(StudentValidationError::EmptyName)
    ));

    student.name = "Ravi".to_string();
    student.id = "missing".to_string();
    let err = service.update_student(student).unwrap_err();
    assert!(matches!(err, ServiceError::StudentNotFound(missing) if missing == "missing"));
    assert_eq!(service.students().unwrap()[0].id, id);
}

#[test]
fn broadcast_resolves_recipients_and_prepends_message() {
    let service = RecordsService::new(MemoryRecordStore::new());
    service
        .save_parent_contacts(vec![
            ParentContact {
                id: "p1".to_string(),
                name: "Meera".to_string(),
                child_name: "Ravi".to_string(),
                phone: "555-0101".to_string(),
                last_contact_date: "2024-04-01".to_string(),
            },
            ParentContact {
                id: "p2".to_string(),
                name: "Tom".to_string(),
                child_name: "Mia".to_string(),
                phone: "555-0102".to_string(),
                last_contact_date: "2024-04-02".to_string(),
            },
        ])
        .unwrap();

    let draft = |title: &str| MessageDraft {
        title: title.to_string(),
        content: "School closed Friday".to_string(),
        category: "Announcement".to_string(),
        urgency: MessageUrgency::Urgent,
    };

    let to_group = service
        .broadcast(
            draft("closure"),
            &RecipientSelection::Group(BroadcastGroup::FrequentlyAbsent),
            "2024-05-01",
        )
        .unwrap();
    assert_eq!(to_group.sent_to, vec!["Meera", "Tom"]);

    let to_one = service
        .broadcast(
            draft("follow-up"),
            &RecipientSelection::Parents(vec!["p2".to_string()]),
            "2024-05-02",
        )
        .unwrap();
    assert_eq!(to_one.sent_to, vec!["Tom"]);

    let messages = service.messages().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, to_one.id);
    assert_eq!(messages[1].id, to_group.id);
}
