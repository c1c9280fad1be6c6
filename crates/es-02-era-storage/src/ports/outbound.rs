//! # Outbound Ports (Driven Ports)
//!
//! The ordered key-value backend the era store is written against.

use crate::error::KVStoreError;

/// A key and its value, as returned by `prefix_scan`.
pub type KvEntry = (Vec<u8>, Vec<u8>);

/// Ordered byte-keyed storage.
///
/// Production: `RocksDbStore` (feature `rocksdb`)
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Commit every entry of `batch`, or none of them.
    fn write_batch(&mut self, batch: Batch) -> Result<(), KVStoreError>;

    /// Entries whose key starts with `prefix`, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<KvEntry>, KVStoreError>;
}

/// Puts committed together by `write_batch`.
///
/// Snapshots are append-only, so a batch never deletes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    entries: Vec<KvEntry>,
}

impl Batch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn put(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Batch {
    type Item = KvEntry;
    type IntoIter = std::vec::IntoIter<KvEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
