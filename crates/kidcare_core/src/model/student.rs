//! Student domain model.
//!
//! # Responsibility
//! - Define the enrolled-child record and its creation request.
//! - Validate the fields enrollment depends on.
//!
//! # Invariants
//! - `id` is stable for the student's lifetime and never reused.
//! - `name` and `join_date` are never blank for a persisted student.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable student identifier; join key for every per-student collection.
pub type StudentId = String;

/// Enrolled child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Enrollment date, `YYYY-MM-DD`.
    pub join_date: String,
}

/// Enrollment request collected by the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewStudent {
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub join_date: String,
}

/// Validation failures for student records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyId,
    EmptyName,
    EmptyJoinDate,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "student id must not be empty"),
            Self::EmptyName => write!(f, "student name must not be empty"),
            Self::EmptyJoinDate => write!(f, "student join date must not be empty"),
        }
    }
}

impl Error for StudentValidationError {}

impl Student {
    /// Builds a student from an enrollment request with a generated id.
    ///
    /// Name and gender are trimmed; validation runs before returning.
    pub fn enroll(request: NewStudent) -> Result<Self, StudentValidationError> {
        let student = Self {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            age: request.age,
            gender: request
                .gender
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            join_date: request.join_date.trim().to_string(),
        };
        student.validate()?;
        Ok(student)
    }

    /// Checks the fields every persisted student must carry.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.id.trim().is_empty() {
            return Err(StudentValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        if self.join_date.trim().is_empty() {
            return Err(StudentValidationError::EmptyJoinDate);
        }
        Ok(())
    }
}
