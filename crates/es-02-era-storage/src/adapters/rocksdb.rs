//! # RocksDB Backend
//!
//! One database directory holds every era. Every `write_batch` becomes a single
//! RocksDB `WriteBatch`, so an era's rows land together or not at all even if
//! the process dies mid-write.
//!
//! Tuning is sized for the workload: a few thousand small rows per era
//! written once, then read back rarely by prefix.

use crate::error::KVStoreError;
use crate::ports::outbound::{Batch, KeyValueStore, KvEntry};
use rocksdb::{
    BlockBasedOptions, Cache, DBCompressionType, Direction, IteratorMode, Options, ReadOptions,
    WriteBatch, WriteOptions, DB,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    pub path: String,
    /// LRU block cache, in bytes
    pub block_cache_size: usize,
    /// Memtable size, in bytes
    pub write_buffer_size: usize,
    pub max_write_buffer_number: i32,
    /// fsync the WAL on every batch
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/eras".to_string(),
            block_cache_size: 32 << 20,
            write_buffer_size: 16 << 20,
            max_write_buffer_number: 2,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Small buffers and no fsync
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 4 << 20,
            write_buffer_size: 2 << 20,
            max_write_buffer_number: 2,
            sync_writes: false,
        }
    }

    fn db_options(&self) -> Options {
        let mut table = BlockBasedOptions::default();
        // point reads of meta:last_era happen once per scan pass
        table.set_bloom_filter(10.0, false);
        table.set_block_cache(&Cache::new_lru_cache(self.block_cache_size));

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(self.write_buffer_size);
        opts.set_max_write_buffer_number(self.max_write_buffer_number);
        opts.set_compression_type(DBCompressionType::Snappy);
        opts.set_block_based_table_factory(&table);
        opts
    }
}

pub struct RocksDbStore {
    db: DB,
    sync_writes: bool,
}

impl RocksDbStore {
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let db = DB::open(&config.db_options(), &config.path).map_err(|e| KVStoreError::Open {
            path: config.path.clone(),
            reason: e.to_string(),
        })?;

        info!(
            path = %config.path,
            sync_writes = config.sync_writes,
            "[es-02] Opened RocksDB era store"
        );
        Ok(Self {
            db,
            sync_writes: config.sync_writes,
        })
    }
}

/// Smallest key greater than every key starting with `prefix`, if any.
fn prefix_upper_bound(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut bound = prefix.to_vec();
    while let Some(last) = bound.pop() {
        if last < u8::MAX {
            bound.push(last + 1);
            return Some(bound);
        }
    }
    None
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db.get(key).map_err(|e| KVStoreError::Read {
            reason: e.to_string(),
        })
    }

    fn write_batch(&mut self, batch: Batch) -> Result<(), KVStoreError> {
        let mut rows = WriteBatch::default();
        for (key, value) in batch {
            rows.put(key, value);
        }

        let mut opts = WriteOptions::default();
        opts.set_sync(self.sync_writes);
        self.db
            .write_opt(rows, &opts)
            .map_err(|e| KVStoreError::Write {
                reason: e.to_string(),
            })
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<KvEntry>, KVStoreError> {
        let mut opts = ReadOptions::default();
        if let Some(upper) = prefix_upper_bound(prefix) {
            opts.set_iterate_upper_bound(upper);
        }

        self.db
            .iterator_opt(IteratorMode::From(prefix, Direction::Forward), opts)
            .map(|item| {
                item.map(|(key, value)| (key.into_vec(), value.into_vec()))
                    .map_err(|e| KVStoreError::Read {
                        reason: e.to_string(),
                    })
            })
            .collect()
    }
}
