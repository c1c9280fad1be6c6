//! In-memory chain for tests and simulations
//!
//! Holds a table of raw eras and an active era that tests advance by hand.
//! Failures can be injected per era to exercise the scanner's abort path.

use crate::domain::RawEraData;
use crate::error::{ChainSourceError, ChainSourceResult};
use crate::ports::ChainDataSource;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{BlockNumber, ChainMetadata, EraIndex, Timestamp};
use std::collections::{BTreeMap, HashMap};

/// Blocks per era used for generated eras (6s blocks, 6h eras)
const GENERATED_BLOCKS_PER_ERA: BlockNumber = 3_600;
/// Era length in milliseconds used for generated eras
const GENERATED_ERA_MILLIS: Timestamp = 21_600_000;

struct ChainState {
    active_era: EraIndex,
    eras: BTreeMap<EraIndex, RawEraData>,
    failures: HashMap<EraIndex, ChainSourceError>,
    generate_missing: bool,
    fetch_log: Vec<EraIndex>,
}

/// In-memory `ChainDataSource`
pub struct InMemoryChain {
    metadata: ChainMetadata,
    state: RwLock<ChainState>,
}

impl InMemoryChain {
    pub fn new(metadata: ChainMetadata, active_era: EraIndex) -> Self {
        Self {
            metadata,
            state: RwLock::new(ChainState {
                active_era,
                eras: BTreeMap::new(),
                failures: HashMap::new(),
                generate_missing: false,
                fetch_log: Vec::new(),
            }),
        }
    }

    /// Serve an empty snapshot for any era without explicit data
    pub fn with_generated_eras(self) -> Self {
        self.state.write().generate_missing = true;
        self
    }

    pub fn insert_era(&self, raw: RawEraData) {
        self.state.write().eras.insert(raw.era, raw);
    }

    pub fn set_active_era(&self, era: EraIndex) {
        self.state.write().active_era = era;
    }

    /// Make every fetch of `era` fail with `error` until cleared
    pub fn fail_era(&self, era: EraIndex, error: ChainSourceError) {
        self.state.write().failures.insert(era, error);
    }

    pub fn clear_failure(&self, era: EraIndex) {
        self.state.write().failures.remove(&era);
    }

    /// Eras requested so far, in request order
    pub fn fetched(&self) -> Vec<EraIndex> {
        self.state.read().fetch_log.clone()
    }

    fn generated(era: EraIndex) -> RawEraData {
        let era_u64 = u64::from(era);
        RawEraData::empty(
            era,
            (era_u64 + 1) * GENERATED_BLOCKS_PER_ERA - 1,
            (era_u64 + 1) * GENERATED_ERA_MILLIS,
        )
    }
}

#[async_trait]
impl ChainDataSource for InMemoryChain {
    fn metadata(&self) -> ChainMetadata {
        self.metadata.clone()
    }

    async fn current_active_era(&self) -> ChainSourceResult<EraIndex> {
        Ok(self.state.read().active_era)
    }

    async fn fetch_era_snapshot(&self, era: EraIndex) -> ChainSourceResult<RawEraData> {
        let mut state = self.state.write();
        state.fetch_log.push(era);

        if let Some(error) = state.failures.get(&era) {
            return Err(error.clone());
        }

        match state.eras.get(&era) {
            Some(raw) => Ok(raw.clone()),
            None if state.generate_missing => Ok(Self::generated(era)),
            None => Err(ChainSourceError::EraTooOld { era }),
        }
    }
}
