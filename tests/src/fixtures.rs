//! Shared test data

use es_01_chain_source::adapters::fixture::{ChainFile, CHAIN_FILE, ERAS_DIR};
use es_01_chain_source::{IdentityInfo, RawEraData};
use shared_types::{ChainMetadata, EraIndex};
use std::path::Path;

pub fn kusama() -> ChainMetadata {
    ChainMetadata {
        network: "kusama".into(),
        endpoint: "wss://kusama-rpc.polkadot.io".into(),
        token_symbol: "KSM".into(),
        token_decimals: 12,
    }
}

/// Era 10: validators A (exposure 100) and B (exposure 50), nominator N
/// backing A with 30.
pub fn era_ten() -> RawEraData {
    RawEraData::empty(10, 35_999, 1_700_000_000_000)
        .with_issuance(14_000_000_000_000_000_000)
        .with_validator("A", 100, 70)
        .with_validator("B", 50, 50)
        .with_points("A", 60)
        .with_points("B", 40)
        .with_nominator("N", &["A"])
        .with_ledger("N", 30)
        .with_identity("A", IdentityInfo::named("Alpha"))
}

/// A busier era: two nominators, one target outside the exposure set and a
/// nominator without a ledger.
pub fn busy_era(era: EraIndex) -> RawEraData {
    let block = u64::from(era) * 3_600;
    RawEraData::empty(era, block, u64::from(era) * 21_600_000)
        .with_validator("A", 500, 100)
        .with_validator("B", 300, 300)
        .with_points("A", 20)
        .with_nominator("N1", &["A", "B"])
        .with_nominator("N2", &["A", "Z"])
        .with_nominator("ghost", &["B"])
        .with_ledger("N1", 200)
        .with_ledger("N2", 200)
        .with_identity("B", IdentityInfo::sub_of("Org", "b-2"))
}

pub fn write_chain_file(dir: &Path, metadata: ChainMetadata, active_era: EraIndex) {
    let chain = ChainFile {
        metadata,
        active_era,
    };
    std::fs::write(dir.join(CHAIN_FILE), serialize(&chain)).unwrap_or_else(|e| {
        panic!("cannot write {}: {}", CHAIN_FILE, e);
    });
}

pub fn write_era_file(dir: &Path, raw: &RawEraData) {
    let eras = dir.join(ERAS_DIR);
    std::fs::create_dir_all(&eras).unwrap_or_else(|e| panic!("cannot create eras dir: {}", e));
    std::fs::write(eras.join(format!("{}.json", raw.era)), serialize(raw))
        .unwrap_or_else(|e| panic!("cannot write era {}: {}", raw.era, e));
}

fn serialize<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| panic!("serialize fixture: {}", e))
}
