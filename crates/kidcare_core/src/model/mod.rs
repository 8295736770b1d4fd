//! Entity model for child records.
//!
//! # Responsibility
//! - Define the record shapes shared by the engine and the record store.
//! - Keep wire field names stable for the textual key-value store.
//!
//! # Invariants
//! - The student id is the join key across every per-student collection.
//! - Dates are ISO `YYYY-MM-DD` strings; ordering is lexical.
//! - Collections are values: mutation produces a new collection.

pub mod attendance;
pub mod growth;
pub mod meal;
pub mod message;
pub mod parent;
pub mod student;
pub mod vaccination;
