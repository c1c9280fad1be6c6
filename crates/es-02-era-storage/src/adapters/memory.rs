//! In-memory key-value store
//!
//! A `BTreeMap`, so prefix scans come back in key order just like RocksDB's.

use crate::error::KVStoreError;
use crate::ports::outbound::{Batch, KeyValueStore, KvEntry};
use std::collections::BTreeMap;
use std::ops::Bound;

#[derive(Debug, Default)]
pub struct InMemoryKVStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write_batch(&mut self, batch: Batch) -> Result<(), KVStoreError> {
        // &mut self: no reader can observe a half-applied batch
        self.entries.extend(batch);
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<KvEntry>, KVStoreError> {
        Ok(self
            .entries
            .range::<[u8], _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}
