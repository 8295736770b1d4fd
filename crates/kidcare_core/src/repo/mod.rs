//! Record store adapter.
//!
//! # Responsibility
//! - Own durability of named collections.
//! - Keep storage details out of the pure engine in `service`.
//!
//! # Invariants
//! - Collections are loaded and saved whole; last write wins.

pub mod record_store;
