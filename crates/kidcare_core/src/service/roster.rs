//! Student roster lifecycle.
//!
//! Removal here only touches the roster; per-student collections are purged
//! by each module's `purge_student`, orchestrated in `records_service`.

use crate::model::student::{NewStudent, Student, StudentValidationError};

/// Enrolls a new student and returns the updated roster plus the record.
pub fn enroll_student(
    mut students: Vec<Student>,
    request: NewStudent,
) -> Result<(Vec<Student>, Student), StudentValidationError> {
    let student = Student::enroll(request)?;
    students.push(student.clone());
    Ok((students, student))
}

/// Replaces the student with the same id. Unknown ids leave the roster as is.
pub fn update_student(mut students: Vec<Student>, updated: Student) -> Vec<Student> {
    if let Some(slot) = students.iter_mut().find(|s| s.id == updated.id) {
        *slot = updated;
    }
    students
}

/// Drops a student from the roster. Unknown ids are a no-op.
pub fn remove_student(mut students: Vec<Student>, student_id: &str) -> Vec<Student> {
    students.retain(|student| student.id != student_id);
    students
}

pub fn find_student<'a>(students: &'a [Student], student_id: &str) -> Option<&'a Student> {
    students.iter().find(|student| student.id == student_id)
}
