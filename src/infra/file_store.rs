//! Rank records exported as JSON files in a local directory.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use tracing::debug;

use super::store::{RankStore, StoreError};
use crate::domain::{Rank, RankCombination};

pub const RANKS_FILENAME: &str = "ranks.json";
pub const COMBINATIONS_FILENAME: &str = "rank_combinations.json";

#[derive(Clone, Debug)]
pub struct FileRankStore {
    dir: PathBuf,
}

impl FileRankStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform's local data directory.
    pub fn in_default_dir() -> Self {
        Self::new(default_data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_json<T: DeserializeOwned>(&self, filename: &str) -> Result<T, StoreError> {
        let path = self.dir.join(filename);
        let content = tokio::fs::read_to_string(&path).await?;
        debug!(path = %path.display(), "[file-store] Read records");
        Ok(serde_json::from_str(&content)?)
    }
}

/// `<local data dir>/rank-boost-pricing`, or the working directory if unknown.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rank-boost-pricing")
}

impl RankStore for FileRankStore {
    async fn fetch_ranks(&self) -> Result<Vec<Rank>, StoreError> {
        self.read_json(RANKS_FILENAME).await
    }

    /// A missing combinations file means no overrides are configured.
    async fn fetch_combinations(&self) -> Result<Vec<RankCombination>, StoreError> {
        match self.read_json(COMBINATIONS_FILENAME).await {
            Err(StoreError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                debug!("[file-store] No combinations file, no overrides configured");
                Ok(Vec::new())
            }
            other => other,
        }
    }
}
