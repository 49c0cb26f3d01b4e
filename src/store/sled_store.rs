//! `RecordStore` backed by sled. Each object type lives in its own tree.
use super::{ObjectType, RecordStore, StoreError, StoreResult};
use crate::config::StoreConfig;

pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let db = config.to_sled().open()?;
        tracing::debug!(path = %config.path.display(), temporary = config.temporary, "opened sled store");
        Ok(Self { db })
    }

    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }

    pub fn flush(&self) -> StoreResult<()> {
        self.db.flush()?;
        Ok(())
    }

    fn tree(&self, object_type: ObjectType) -> StoreResult<sled::Tree> {
        Ok(self.db.open_tree(object_type.as_str())?)
    }
}

impl RecordStore for SledStore {
    fn create(&self, object_type: ObjectType, id: &str, record: &[u8]) -> StoreResult<()> {
        // compare_and_swap against an absent value makes the existence check and the write one step
        let swapped =
            self.tree(object_type)?
                .compare_and_swap(id.as_bytes(), None::<&[u8]>, Some(record))?;

        swapped.map_err(|_| StoreError::AlreadyExists {
            object_type,
            id: id.to_string(),
        })
    }

    fn get(&self, object_type: ObjectType, id: &str) -> StoreResult<Vec<u8>> {
        match self.tree(object_type)?.get(id.as_bytes())? {
            Some(value) => Ok(value.to_vec()),
            None => Err(StoreError::NotFound {
                object_type,
                id: id.to_string(),
            }),
        }
    }

    fn put(&self, object_type: ObjectType, id: &str, record: &[u8]) -> StoreResult<()> {
        self.tree(object_type)?.insert(id.as_bytes(), record)?;
        Ok(())
    }

    fn scan(&self, object_type: ObjectType) -> StoreResult<Vec<(String, Vec<u8>)>> {
        self.tree(object_type)?
            .iter()
            .map(|entry| -> StoreResult<(String, Vec<u8>)> {
                let (key, value) = entry?;
                let id = String::from_utf8(key.to_vec())
                    .map_err(|_| StoreError::Fault(format!("non utf-8 key in {object_type}")))?;
                Ok((id, value.to_vec()))
            })
            .collect()
    }
}
