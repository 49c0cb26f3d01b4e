//! In-memory `RecordStore`. Deterministic and test-friendly; nothing survives the process.
use super::{ObjectType, RecordStore, StoreError, StoreResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<ObjectType, BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Fault("memory store lock poisoned".to_string())
}

impl RecordStore for MemoryStore {
    fn create(&self, object_type: ObjectType, id: &str, record: &[u8]) -> StoreResult<()> {
        // check and insert under one write guard
        let mut guard = self.records.write().map_err(|_| poisoned())?;
        let table = guard.entry(object_type).or_default();

        if table.contains_key(id) {
            return Err(StoreError::AlreadyExists {
                object_type,
                id: id.to_string(),
            });
        }

        table.insert(id.to_string(), record.to_vec());
        Ok(())
    }

    fn get(&self, object_type: ObjectType, id: &str) -> StoreResult<Vec<u8>> {
        let guard = self.records.read().map_err(|_| poisoned())?;

        guard
            .get(&object_type)
            .and_then(|table| table.get(id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                object_type,
                id: id.to_string(),
            })
    }

    fn put(&self, object_type: ObjectType, id: &str, record: &[u8]) -> StoreResult<()> {
        let mut guard = self.records.write().map_err(|_| poisoned())?;
        guard
            .entry(object_type)
            .or_default()
            .insert(id.to_string(), record.to_vec());
        Ok(())
    }

    fn scan(&self, object_type: ObjectType) -> StoreResult<Vec<(String, Vec<u8>)>> {
        let guard = self.records.read().map_err(|_| poisoned())?;

        Ok(guard
            .get(&object_type)
            .map(|table| {
                table
                    .iter()
                    .map(|(id, record)| (id.clone(), record.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
