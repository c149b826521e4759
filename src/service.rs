//! Reads a fresh snapshot from the record store and prices selections against it.

use tracing::{info, warn};

use crate::domain::{
    BaseOutcome, Degradation, PriceRequest, Priced, PricingEngine, PricingSnapshot, Quote,
    RankCatalog, ServiceOption,
};
use crate::infra::{FileRankStore, HttpRankStore, RankStore, StoreError};
use crate::util::config::PricingConfig;

pub struct PricingService<S> {
    store: S,
    engine: PricingEngine,
}

impl<S: RankStore> PricingService<S> {
    pub fn new(store: S, engine: PricingEngine) -> Self {
        Self { store, engine }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// Reads catalog and overrides concurrently, substituting defaults on failure.
    pub async fn load_snapshot(&self) -> Priced<PricingSnapshot> {
        let (ranks, combinations) =
            tokio::join!(self.store.fetch_ranks(), self.store.fetch_combinations());
        let mut degradations = Vec::new();

        let catalog = match ranks {
            Ok(ranks) => {
                if ranks.is_empty() {
                    warn!("[pricing] Rank catalog empty, using built-in catalog");
                    degradations.push(Degradation::CatalogUnavailable {
                        reason: "catalog is empty".to_string(),
                    });
                }
                RankCatalog::with_fallback(ranks)
            }
            Err(err) => {
                warn!("[pricing] Rank catalog read failed, using built-in catalog: {err}");
                degradations.push(Degradation::CatalogUnavailable {
                    reason: err.to_string(),
                });
                RankCatalog::builtin()
            }
        };

        let combinations = combinations.unwrap_or_else(|err| {
            warn!("[pricing] Override read failed, pricing by formula: {err}");
            degradations.push(Degradation::OverrideReadFailure {
                reason: err.to_string(),
            });
            Vec::new()
        });

        Priced::new(PricingSnapshot::new(catalog, combinations), degradations)
    }

    /// Base price for `request` against the store's current records.
    pub async fn calculate_price(&self, request: &PriceRequest) -> Priced<BaseOutcome> {
        let (snapshot, degradations) = self.load_snapshot().await.into_parts();
        self.engine
            .calculate(&snapshot, request)
            .with_degradations(degradations)
    }

    /// Prices `request`, applies `options` and returns the checkout handoff.
    pub async fn quote(&self, request: &PriceRequest, options: &[ServiceOption]) -> Quote {
        let base = self.calculate_price(request).await;
        let quote = Quote::new(request, base, options);
        info!(
            quote_id = %quote.id,
            from = %quote.from_rank_id,
            to = %quote.to_rank_id,
            final_price = quote.final_price,
            degraded = quote.is_degraded(),
            "[pricing] Quote created"
        );
        quote
    }
}

impl PricingService<HttpRankStore> {
    pub fn from_config(config: &PricingConfig) -> Result<Self, StoreError> {
        Ok(Self::new(HttpRankStore::new(&config.store)?, config.engine()))
    }
}

impl PricingService<FileRankStore> {
    /// File-backed service rooted at `config.data_dir` or the default data dir.
    pub fn file_backed(config: &PricingConfig) -> Self {
        let store = config
            .data_dir
            .clone()
            .map(FileRankStore::new)
            .unwrap_or_else(FileRankStore::in_default_dir);
        Self::new(store, config.engine())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rank, RankCombination};
    use crate::infra::StaticRankStore;

    struct FailingStore {
        ranks: bool,
        combinations: bool,
    }

    impl RankStore for FailingStore {
        async fn fetch_ranks(&self) -> Result<Vec<Rank>, StoreError> {
            if self.ranks {
                Err(StoreError::Api("ranks offline".into()))
            } else {
                Ok(RankCatalog::builtin().ranks().to_vec())
            }
        }

        async fn fetch_combinations(&self) -> Result<Vec<RankCombination>, StoreError> {
            if self.combinations {
                Err(StoreError::Api("combinations offline".into()))
            } else {
                Ok(Vec::new())
            }
        }
    }

    fn warrior_climb() -> PriceRequest {
        let catalog = RankCatalog::builtin();
        let warrior = catalog.get("warrior").cloned().unwrap();
        PriceRequest::new(warrior.clone(), warrior)
            .from_position(0, 1)
            .to_position(2, 2)
    }

    #[tokio::test]
    async fn catalog_failure_degrades_to_builtin() {
        let service = PricingService::new(
            FailingStore {
                ranks: true,
                combinations: false,
            },
            PricingEngine::default(),
        );
        let priced = service.calculate_price(&warrior_climb()).await;
        assert_eq!(*priced.value(), BaseOutcome::Formula(13.5));
        assert!(matches!(
            priced.degradations(),
            [Degradation::CatalogUnavailable { .. }]
        ));
    }

    #[tokio::test]
    async fn override_failure_falls_through_to_formula() {
        let service = PricingService::new(
            FailingStore {
                ranks: false,
                combinations: true,
            },
            PricingEngine::default(),
        );
        let priced = service.calculate_price(&warrior_climb()).await;
        assert_eq!(priced.value().amount(), 13.5);
        assert!(matches!(
            priced.degradations(),
            [Degradation::OverrideReadFailure { .. }]
        ));
    }

    #[tokio::test]
    async fn administrator_edits_are_read_per_call() {
        let mut ranks = RankCatalog::builtin().ranks().to_vec();
        ranks[0].base_price = 6.0;
        let store = StaticRankStore::new(ranks, Vec::new());
        let service = PricingService::new(store, PricingEngine::default());

        let priced = service.calculate_price(&warrior_climb()).await;
        assert!(!priced.is_degraded());
        assert_eq!(priced.value().amount(), 15.5);
    }

    #[tokio::test]
    async fn empty_catalog_is_reported() {
        let service = PricingService::new(StaticRankStore::default(), PricingEngine::default());
        let snapshot = service.load_snapshot().await;
        assert!(matches!(
            snapshot.degradations(),
            [Degradation::CatalogUnavailable { reason }] if reason == "catalog is empty"
        ));
        assert_eq!(snapshot.value().catalog, RankCatalog::builtin());
    }

    #[tokio::test]
    async fn quote_applies_surcharge_to_override() {
        let override_price = RankCombination {
            id: None,
            from_rank_id: "warrior".into(),
            to_rank_id: "warrior".into(),
            from_subdivision: Some(0),
            to_subdivision: None,
            price: 50.0,
        };
        let ranks = RankCatalog::builtin().ranks().to_vec();
        let store = StaticRankStore::new(ranks, vec![override_price]);
        let service = PricingService::new(store, PricingEngine::default());
        let options = [ServiceOption::new("Priority Queue", 20.0, true)];

        let quote = service.quote(&warrior_climb(), &options).await;
        assert_eq!(quote.base, BaseOutcome::Override(50.0));
        assert_eq!(quote.final_price, 60.0);
        assert!(quote.checkout_ready());
    }

    #[test]
    fn file_backed_uses_configured_dir() {
        let config = PricingConfig {
            data_dir: Some("/srv/ranks".into()),
            ..PricingConfig::default()
        };
        let service = PricingService::file_backed(&config);
        assert_eq!(service.store().dir(), std::path::Path::new("/srv/ranks"));
    }
}
