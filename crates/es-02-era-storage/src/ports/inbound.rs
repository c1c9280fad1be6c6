//! # Inbound Ports (Driving Ports)
//!
//! The persistence API the era scanner drives.

use crate::error::EraStoreResult;
use async_trait::async_trait;
use shared_types::{ChainData, EraGap, EraIndex};

/// Append-only store of per-era snapshots.
///
/// Production: `KvEraStore<RocksDbStore>`
/// Testing: `InMemoryEraStore`
#[async_trait]
pub trait EraStore: Send + Sync {
    /// Highest committed era, `0` when nothing has been stored.
    ///
    /// Always reads the store; callers must not cache it.
    async fn last_processed_era(&self) -> EraStoreResult<EraIndex>;

    /// Commit every row of `snapshot` in one atomic batch.
    ///
    /// ## Atomicity Guarantee
    ///
    /// Either the era row, all validator rows, all voter rows and the
    /// advanced `last_processed_era` become visible together, or nothing does.
    async fn insert(&self, snapshot: ChainData) -> EraStoreResult<()>;

    /// Rebuild a committed snapshot.
    async fn load_snapshot(&self, era: EraIndex) -> EraStoreResult<Option<ChainData>>;

    /// Record a range of history that will never be stored. Idempotent.
    async fn record_gap(&self, gap: EraGap) -> EraStoreResult<()>;

    /// Recorded gaps, ascending by start era.
    async fn gaps(&self) -> EraStoreResult<Vec<EraGap>>;

    /// Committed eras, ascending.
    async fn stored_eras(&self) -> EraStoreResult<Vec<EraIndex>>;
}
