//! Driven Ports (SPI - what the scanner requires from the chain)

use crate::domain::{IdentityInfo, RawEraData};
use crate::error::ChainSourceResult;
use async_trait::async_trait;
use shared_types::{AccountId, ChainMetadata, EraIndex};
use std::collections::BTreeMap;

/// Source of per-era staking data
///
/// Production: `FixtureChainSource`, or a node RPC client behind the same trait
/// Testing: `InMemoryChain`
#[async_trait]
pub trait ChainDataSource: Send + Sync {
    /// Static chain properties (network name, token symbol/decimals)
    fn metadata(&self) -> ChainMetadata;

    /// The era currently active on chain. Never finalized.
    async fn current_active_era(&self) -> ChainSourceResult<EraIndex>;

    /// Fetch the raw staking data of a completed era
    ///
    /// Reads are anchored at the era's last block.
    async fn fetch_era_snapshot(&self, era: EraIndex) -> ChainSourceResult<RawEraData>;
}

/// Account identity lookup (address → optional identity)
pub trait IdentityLookup {
    fn identity_of(&self, who: &AccountId) -> ChainSourceResult<Option<IdentityInfo>>;
}

impl IdentityLookup for BTreeMap<AccountId, IdentityInfo> {
    fn identity_of(&self, who: &AccountId) -> ChainSourceResult<Option<IdentityInfo>> {
        Ok(self.get(who).cloned())
    }
}
