//! JSON fixture chain source
//!
//! Serves era data dumped to disk so the scanner can run without a live node.
//!
//! ```text
//! <root>/
//! ├── chain.json        # ChainMetadata fields + "active_era"
//! └── eras/
//!     ├── 1041.json     # RawEraData
//!     └── 1042.json
//! ```
//!
//! `chain.json` is re-read on every `current_active_era` call so an external
//! process can advance the era by rewriting it.

use crate::domain::RawEraData;
use crate::error::{ChainSourceError, ChainSourceResult};
use crate::ports::ChainDataSource;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{ChainMetadata, EraIndex};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the chain descriptor file inside the fixture root
pub const CHAIN_FILE: &str = "chain.json";
/// Directory holding one JSON file per era
pub const ERAS_DIR: &str = "eras";

/// Contents of `chain.json`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFile {
    #[serde(flatten)]
    pub metadata: ChainMetadata,
    pub active_era: EraIndex,
}

/// `ChainDataSource` backed by a directory of JSON files
pub struct FixtureChainSource {
    root: PathBuf,
    metadata: ChainMetadata,
}

impl FixtureChainSource {
    /// Open a fixture directory, reading its chain metadata once
    pub async fn open(root: impl Into<PathBuf>) -> ChainSourceResult<Self> {
        let root = root.into();
        let chain = read_chain_file(&root).await?;
        debug!(
            root = %root.display(),
            network = %chain.metadata.network,
            active_era = chain.active_era,
            "[es-01] Fixture chain source opened"
        );
        Ok(Self {
            root,
            metadata: chain.metadata,
        })
    }

    fn era_path(&self, era: EraIndex) -> PathBuf {
        self.root.join(ERAS_DIR).join(format!("{}.json", era))
    }
}

async fn read_chain_file(root: &Path) -> ChainSourceResult<ChainFile> {
    let path = root.join(CHAIN_FILE);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ChainSourceError::NodeUnavailable {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
    serde_json::from_str(&content).map_err(|e| ChainSourceError::NodeUnavailable {
        reason: format!("invalid {}: {}", path.display(), e),
    })
}

#[async_trait]
impl ChainDataSource for FixtureChainSource {
    fn metadata(&self) -> ChainMetadata {
        self.metadata.clone()
    }

    async fn current_active_era(&self) -> ChainSourceResult<EraIndex> {
        Ok(read_chain_file(&self.root).await?.active_era)
    }

    async fn fetch_era_snapshot(&self, era: EraIndex) -> ChainSourceResult<RawEraData> {
        let path = self.era_path(era);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ChainSourceError::EraTooOld { era })
            }
            Err(e) => {
                return Err(ChainSourceError::NodeUnavailable {
                    reason: format!("cannot read {}: {}", path.display(), e),
                })
            }
        };

        let raw: RawEraData =
            serde_json::from_str(&content).map_err(|e| ChainSourceError::MalformedData {
                era,
                reason: e.to_string(),
            })?;

        if raw.era != era {
            return Err(ChainSourceError::MalformedData {
                era,
                reason: format!("file contains era {}", raw.era),
            });
        }

        Ok(raw)
    }
}
