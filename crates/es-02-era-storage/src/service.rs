//! # Era Store Service
//!
//! `EraStore` over any `KeyValueStore`. The backend sits behind one lock so
//! the ascending-order check and the batch write happen as one step.

use crate::adapters::InMemoryKVStore;
use crate::domain::keys::{decode_era, KeyPrefix};
use crate::domain::rows::{decode, encode, EraRow, ValidatorRow, VoterRow};
use crate::error::{EraStoreError, EraStoreResult};
use crate::ports::inbound::EraStore;
use crate::ports::outbound::{Batch, KeyValueStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{ChainData, EraGap, EraIndex};
use tracing::{debug, info};

/// Era store backed by a key-value database.
pub struct KvEraStore<KV: KeyValueStore> {
    kv: RwLock<KV>,
}

/// Era store kept entirely in memory.
pub type InMemoryEraStore = KvEraStore<InMemoryKVStore>;

impl InMemoryEraStore {
    pub fn in_memory() -> Self {
        Self::new(InMemoryKVStore::new())
    }
}

impl<KV: KeyValueStore> KvEraStore<KV> {
    pub fn new(kv: KV) -> Self {
        Self {
            kv: RwLock::new(kv),
        }
    }

    /// Unwrap the backend, e.g. to reopen it in a test.
    pub fn into_inner(self) -> KV {
        self.kv.into_inner()
    }

    fn read_last_era(kv: &KV) -> EraStoreResult<EraIndex> {
        match kv.get(&KeyPrefix::last_era_key())? {
            None => Ok(0),
            Some(bytes) => decode_era(&bytes).ok_or_else(|| EraStoreError::Corrupted {
                key: "meta:last_era".to_string(),
                reason: format!("expected 4 bytes, found {}", bytes.len()),
            }),
        }
    }

    /// Every row of `snapshot` plus the advanced `meta:last_era` pointer.
    fn snapshot_batch(snapshot: &ChainData) -> EraStoreResult<Batch> {
        let era = snapshot.era_index;
        let mut batch = Batch::with_capacity(2 + snapshot.validators.len() + snapshot.voter_count());

        batch.put(
            KeyPrefix::era_key(era),
            encode(&EraRow::from_snapshot(snapshot))?,
        );

        for (position, validator) in snapshot.validators.iter().enumerate() {
            let row = ValidatorRow {
                position: position as u32,
                address: validator.address.clone(),
                display_name: validator.display_name.clone(),
                era_points: validator.era_points,
                exposure: validator.exposure.clone(),
            };
            batch.put(
                KeyPrefix::validator_key(era, &validator.address),
                encode(&row)?,
            );

            for (n, voter) in validator.voters.iter().enumerate() {
                let row = VoterRow {
                    validator: validator.address.clone(),
                    address: voter.address.clone(),
                    stake: voter.stake,
                };
                batch.put(
                    KeyPrefix::voter_key(era, &validator.address, n as u32),
                    encode(&row)?,
                );
            }
        }

        batch.put(KeyPrefix::last_era_key(), era.to_be_bytes().to_vec());
        Ok(batch)
    }
}

#[async_trait]
impl<KV: KeyValueStore> EraStore for KvEraStore<KV> {
    async fn last_processed_era(&self) -> EraStoreResult<EraIndex> {
        Self::read_last_era(&self.kv.read())
    }

    async fn insert(&self, snapshot: ChainData) -> EraStoreResult<()> {
        let era = snapshot.era_index;
        // Encode before taking the lock
        let batch = Self::snapshot_batch(&snapshot)?;
        let rows = batch.len();

        let mut kv = self.kv.write();
        let last = Self::read_last_era(&kv)?;
        if era <= last {
            return Err(EraStoreError::NotAscending { era, last });
        }
        kv.write_batch(batch)?;

        info!(
            "[es-02] 💾 Stored era {} ({} validators, {} rows)",
            era,
            snapshot.validators.len(),
            rows
        );
        Ok(())
    }

    async fn load_snapshot(&self, era: EraIndex) -> EraStoreResult<Option<ChainData>> {
        let kv = self.kv.read();

        let Some(bytes) = kv.get(&KeyPrefix::era_key(era))? else {
            return Ok(None);
        };
        let era_row: EraRow = decode(&bytes)?;

        let validators = kv
            .prefix_scan(&KeyPrefix::validator_prefix(era))?
            .into_iter()
            .map(|(_, v)| decode::<ValidatorRow>(&v))
            .collect::<EraStoreResult<Vec<_>>>()?;
        let voters = kv
            .prefix_scan(&KeyPrefix::voter_prefix(era))?
            .into_iter()
            .map(|(_, v)| decode::<VoterRow>(&v))
            .collect::<EraStoreResult<Vec<_>>>()?;

        era_row.rebuild(validators, voters).map(Some)
    }

    async fn record_gap(&self, gap: EraGap) -> EraStoreResult<()> {
        let mut batch = Batch::default();
        batch.put(KeyPrefix::gap_key(gap.from), encode(&gap)?);
        self.kv.write().write_batch(batch)?;
        debug!("[es-02] Recorded history gap {}", gap);
        Ok(())
    }

    async fn gaps(&self) -> EraStoreResult<Vec<EraGap>> {
        self.kv
            .read()
            .prefix_scan(KeyPrefix::Gap.as_bytes())?
            .into_iter()
            .map(|(_, v)| decode::<EraGap>(&v))
            .collect()
    }

    async fn stored_eras(&self) -> EraStoreResult<Vec<EraIndex>> {
        Ok(self
            .kv
            .read()
            .prefix_scan(KeyPrefix::Era.as_bytes())?
            .into_iter()
            .filter_map(|(k, _)| KeyPrefix::parse_era_key(&k))
            .collect())
    }
}
