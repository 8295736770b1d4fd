//! Record store adapter: typed load/save of named collections.
//!
//! # Responsibility
//! - Map each collection type to its logical store name.
//! - Serialize whole collections as JSON text and persist them as one value.
//!
//! # Invariants
//! - `load` of a never-saved collection yields the empty default shape.
//! - `save` overwrites the entire named collection; there is no merge.
//! - Payloads that fail to decode surface as `StoreError::InvalidData`.

use crate::db::DbError;
use crate::model::attendance::AttendanceBook;
use crate::model::growth::GrowthBook;
use crate::model::meal::{DailyMenuBook, MealLog};
use crate::model::message::Message;
use crate::model::parent::ParentContact;
use crate::model::student::Student;
use crate::model::vaccination::VaccinationBook;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while reading or writing a collection.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialization {
        collection: &'static str,
        source: serde_json::Error,
    },
    InvalidData {
        collection: &'static str,
        message: String,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization { collection, source } => {
                write!(f, "failed to serialize collection `{collection}`: {source}")
            }
            Self::InvalidData {
                collection,
                message,
            } => write!(f, "invalid persisted data in `{collection}`: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization { source, .. } => Some(source),
            Self::InvalidData { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Logical collection names used by the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Students,
    Attendance,
    Growth,
    Vaccinations,
    MealLog,
    DailyMeals,
    Messages,
    ParentContacts,
}

impl CollectionName {
    pub const ALL: [CollectionName; 8] = [
        Self::Students,
        Self::Attendance,
        Self::Growth,
        Self::Vaccinations,
        Self::MealLog,
        Self::DailyMeals,
        Self::Messages,
        Self::ParentContacts,
    ];

    /// Stable key under which the collection is stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Attendance => "attendance",
            Self::Growth => "growth",
            Self::Vaccinations => "vaccinations",
            Self::MealLog => "meals",
            Self::DailyMeals => "daily_meals",
            Self::Messages => "messages",
            Self::ParentContacts => "parent_contacts",
        }
    }
}

/// A value persisted as one named collection.
pub trait Collection: Serialize + DeserializeOwned + Default {
    const NAME: CollectionName;
}

impl Collection for Vec<Student> {
    const NAME: CollectionName = CollectionName::Students;
}

impl Collection for AttendanceBook {
    const NAME: CollectionName = CollectionName::Attendance;
}

impl Collection for GrowthBook {
    const NAME: CollectionName = CollectionName::Growth;
}

impl Collection for VaccinationBook {
    const NAME: CollectionName = CollectionName::Vaccinations;
}

impl Collection for MealLog {
    const NAME: CollectionName = CollectionName::MealLog;
}

impl Collection for DailyMenuBook {
    const NAME: CollectionName = CollectionName::DailyMeals;
}

impl Collection for Vec<Message> {
    const NAME: CollectionName = CollectionName::Messages;
}

impl Collection for Vec<ParentContact> {
    const NAME: CollectionName = CollectionName::ParentContacts;
}

/// Raw text key-value store contract.
///
/// Implementations only move opaque payloads; typing lives in
/// [`RecordStore::load`] and [`RecordStore::save`].
pub trait RecordStore {
    /// Returns the stored payload, or `None` if the name was never saved.
    fn read_raw(&self, name: CollectionName) -> StoreResult<Option<String>>;
    /// Replaces the stored payload for `name`.
    fn write_raw(&self, name: CollectionName, payload: &str) -> StoreResult<()>;

    /// Loads a typed collection, defaulting to its empty shape.
    fn load<C: Collection>(&self) -> StoreResult<C>
    where
        Self: Sized,
    {
        let name = C::NAME.as_str();
        match self.read_raw(C::NAME)? {
            None => {
                debug!("event=collection_load module=repo status=ok collection={name} found=false");
                Ok(C::default())
            }
            Some(payload) => {
                let value = serde_json::from_str(&payload).map_err(|err| {
                    error!(
                        "event=collection_load module=repo status=error collection={name} error_code=invalid_data"
                    );
                    StoreError::InvalidData {
                        collection: name,
                        message: err.to_string(),
                    }
                })?;
                debug!(
                    "event=collection_load module=repo status=ok collection={name} found=true bytes={}",
                    payload.len()
                );
                Ok(value)
            }
        }
    }

    /// Serializes and overwrites a typed collection.
    fn save<C: Collection>(&self, value: &C) -> StoreResult<()>
    where
        Self: Sized,
    {
        let name = C::NAME.as_str();
        let payload =
            serde_json::to_string(value).map_err(|source| StoreError::Serialization {
                collection: name,
                source,
            })?;
        self.write_raw(C::NAME, &payload)?;
        debug!(
            "event=collection_save module=repo status=ok collection={name} bytes={}",
            payload.len()
        );
        Ok(())
    }
}

impl<S: RecordStore> RecordStore for &S {
    fn read_raw(&self, name: CollectionName) -> StoreResult<Option<String>> {
        (**self).read_raw(name)
    }

    fn write_raw(&self, name: CollectionName, payload: &str) -> StoreResult<()> {
        (**self).write_raw(name, payload)
    }
}

/// SQLite-backed store; one row per collection.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn read_raw(&self, name: CollectionName) -> StoreResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE name = ?1;",
                [name.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_raw(&self, name: CollectionName, payload: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO collections (name, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![name.as_str(), payload],
        )?;
        Ok(())
    }
}

/// Process-lifetime store holding serialized payloads in memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    payloads: RefCell<BTreeMap<&'static str, String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn read_raw(&self, name: CollectionName) -> StoreResult<Option<String>> {
        Ok(self.payloads.borrow().get(name.as_str()).cloned())
    }

    fn write_raw(&self, name: CollectionName, payload: &str) -> StoreResult<()> {
        self.payloads
            .borrow_mut()
            .insert(name.as_str(), payload.to_string());
        Ok(())
    }
}
