//! Read-only access to the storefront's rank records.
//!
//! - `RankStore` is the seam the pricing service reads through.
//! - `HttpRankStore` talks to the record store's JSON API.
//! - `StaticRankStore` serves records already held in memory.
//!
//! Nothing here caches: every read returns the store's current state.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Rank, RankCombination};
use crate::util::config::StoreConfig;
use crate::util::version::user_agent;

const RANKS_PATH: &str = "ranks";
const COMBINATIONS_PATH: &str = "rank-combinations";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid record data: {0}")]
    Serde(#[from] serde_json::Error),
}

#[allow(async_fn_in_trait)]
pub trait RankStore {
    /// All rank records, in any order.
    async fn fetch_ranks(&self) -> Result<Vec<Rank>, StoreError>;

    /// All override records, in table order.
    async fn fetch_combinations(&self) -> Result<Vec<RankCombination>, StoreError>;
}

/// Records held in memory, e.g. supplied by an embedding application.
#[derive(Clone, Debug, Default)]
pub struct StaticRankStore {
    pub ranks: Vec<Rank>,
    pub combinations: Vec<RankCombination>,
}

impl StaticRankStore {
    pub fn new(ranks: Vec<Rank>, combinations: Vec<RankCombination>) -> Self {
        Self {
            ranks,
            combinations,
        }
    }
}

impl RankStore for StaticRankStore {
    async fn fetch_ranks(&self) -> Result<Vec<Rank>, StoreError> {
        Ok(self.ranks.clone())
    }

    async fn fetch_combinations(&self) -> Result<Vec<RankCombination>, StoreError> {
        Ok(self.combinations.clone())
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    fn into_data(self) -> Result<T, StoreError> {
        if self.status.eq_ignore_ascii_case("ok") {
            self.data
                .ok_or_else(|| StoreError::Api("response missing data".into()))
        } else {
            Err(StoreError::Api(self.message.unwrap_or(self.status)))
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpRankStore {
    http: Client,
    base_url: Url,
}

impl HttpRankStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::with_base_url(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn with_base_url(base: &str, timeout: Duration) -> Result<Self, StoreError> {
        let base_url = Url::parse(&normalize_base(base))?;
        let http = Client::builder()
            .user_agent(user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch_data<T>(&self, path: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(%url, "[store] Requesting records");
        let response = self.http.get(url).send().await?.error_for_status()?;
        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope.into_data()
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

impl RankStore for HttpRankStore {
    async fn fetch_ranks(&self) -> Result<Vec<Rank>, StoreError> {
        self.fetch_data(RANKS_PATH).await
    }

    async fn fetch_combinations(&self) -> Result<Vec<RankCombination>, StoreError> {
        self.fetch_data(COMBINATIONS_PATH).await
    }
}

/// `Url::join` drops the last path segment unless the base ends with `/`.
fn normalize_base(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}
