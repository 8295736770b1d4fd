//! Child record and scheduling engine.
//!
//! # Responsibility
//! - Pure derivations from old collections to new collections and views.
//! - A store-backed facade (`records_service`) for load/derive/save flows.
//!
//! # Invariants
//! - Engine functions are total: unknown ids and empty collections yield
//!   empty results or zero counts, never errors.

pub mod attendance;
pub mod broadcast;
pub mod growth;
pub mod immunization;
pub mod meals;
pub mod records_service;
pub mod roster;
