//! Keyed record persistence used by the lifecycle operations.
//!
//! Records are opaque bytes addressed by `(ObjectType, id)`. Two records of
//! different types never alias, even when they share an id.
//!
//! Every implementation must make [`RecordStore::create`] atomic with respect
//! to concurrent callers: the absence check and the write happen as one step.
//! Apply's letter-id uniqueness relies on it.
use crate::error::{LocError, LocResult};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::sync::Arc;

pub mod memory;
pub mod sled_store;

pub use memory::MemoryStore;
pub use sled_store::SledStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    Customer,
    BankEmployee,
    Bank,
    LetterOfCredit,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::Customer,
        ObjectType::BankEmployee,
        ObjectType::Bank,
        ObjectType::LetterOfCredit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Customer => "customer",
            ObjectType::BankEmployee => "bankEmployee",
            ObjectType::Bank => "bank",
            ObjectType::LetterOfCredit => "letterOfCredit",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("no {object_type} with id {id}")]
    NotFound { object_type: ObjectType, id: String },
    #[error("{object_type} with id {id} already exists")]
    AlreadyExists { object_type: ObjectType, id: String },
    #[error("store fault: {0}")]
    Fault(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::Fault(err.to_string())
    }
}

pub trait RecordStore: Send + Sync {
    /// Insert a record, failing with `AlreadyExists` if the key is taken.
    fn create(&self, object_type: ObjectType, id: &str, record: &[u8]) -> StoreResult<()>;

    /// Fetch a record, failing with `NotFound` if the key is absent.
    fn get(&self, object_type: ObjectType, id: &str) -> StoreResult<Vec<u8>>;

    /// Unconditional upsert.
    fn put(&self, object_type: ObjectType, id: &str, record: &[u8]) -> StoreResult<()>;

    /// All records of one type, ordered by id.
    fn scan(&self, object_type: ObjectType) -> StoreResult<Vec<(String, Vec<u8>)>>;
}

impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn create(&self, object_type: ObjectType, id: &str, record: &[u8]) -> StoreResult<()> {
        (**self).create(object_type, id, record)
    }

    fn get(&self, object_type: ObjectType, id: &str) -> StoreResult<Vec<u8>> {
        (**self).get(object_type, id)
    }

    fn put(&self, object_type: ObjectType, id: &str, record: &[u8]) -> StoreResult<()> {
        (**self).put(object_type, id, record)
    }

    fn scan(&self, object_type: ObjectType) -> StoreResult<Vec<(String, Vec<u8>)>> {
        (**self).scan(object_type)
    }
}

pub fn create_json<S, T>(store: &S, object_type: ObjectType, id: &str, value: &T) -> LocResult<()>
where
    S: RecordStore + ?Sized,
    T: Serialize,
{
    let bytes = serde_json::to_vec(value)?;
    store.create(object_type, id, &bytes)?;
    tracing::debug!(%object_type, id, "record created");
    Ok(())
}

pub fn get_json<S, T>(store: &S, object_type: ObjectType, id: &str) -> LocResult<T>
where
    S: RecordStore + ?Sized,
    T: DeserializeOwned,
{
    let bytes = store.get(object_type, id)?;
    decode(object_type, id, &bytes)
}

pub fn put_json<S, T>(store: &S, object_type: ObjectType, id: &str, value: &T) -> LocResult<()>
where
    S: RecordStore + ?Sized,
    T: Serialize,
{
    let bytes = serde_json::to_vec(value)?;
    store.put(object_type, id, &bytes)?;
    tracing::debug!(%object_type, id, "record written");
    Ok(())
}

pub fn scan_json<S, T>(store: &S, object_type: ObjectType) -> LocResult<Vec<T>>
where
    S: RecordStore + ?Sized,
    T: DeserializeOwned,
{
    store
        .scan(object_type)?
        .iter()
        .map(|(id, bytes)| decode(object_type, id, bytes))
        .collect()
}

// A stored record that no longer decodes is corruption, not bad caller input.
fn decode<T: DeserializeOwned>(object_type: ObjectType, id: &str, bytes: &[u8]) -> LocResult<T> {
    serde_json::from_slice(bytes).map_err(|err| {
        LocError::StoreFault(format!(
            "stored {} with ID {} could not be decoded: {}",
            object_type, id, err
        ))
    })
}
