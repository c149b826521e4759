//! Pricing engine for rank and MMR boosting orders.
//!
//! Prices a climb from one ladder position to another against a catalog
//! snapshot, honoring administrator overrides, then applies add-on
//! surcharges. Store reads degrade to built-in defaults instead of failing.

pub mod domain;
pub mod infra;
pub mod service;
pub mod util;

pub use domain::{
    calculate_final_price, calculate_price, BaseOutcome, Degradation, IneligibleReason,
    OverridePolicy, PriceRequest, Priced, PricingEngine, PricingSnapshot, Quote, Rank,
    RankCatalog, RankCombination, ServiceOption,
};
pub use infra::{FileRankStore, HttpRankStore, RankStore, StaticRankStore, StoreError};
pub use service::PricingService;
pub use util::config::{load_config, PricingConfig};
