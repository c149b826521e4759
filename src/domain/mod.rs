//! Rank-progression pricing logic lives here.

pub mod catalog;
pub mod entities;
pub mod outcome;
pub mod overrides;
pub mod pricing;
pub mod progression;
pub mod quote;
pub mod service_options;

pub use catalog::RankCatalog;
pub use entities::{
    PointsRange, Position, Rank, RankCombination, RankId, RankSubdivision, ServiceOption,
    SubdivisionOrder,
};
pub use outcome::{Degradation, Priced};
pub use overrides::{find_override, OverridePolicy, OverrideQuery};
pub use pricing::{
    calculate_price, BaseOutcome, IneligibleReason, PriceRequest, PricingEngine, PricingSnapshot,
    DEFAULT_PER_POINT_RATE,
};
pub use progression::{points_progress, star_distance};
pub use quote::Quote;
pub use service_options::{calculate_final_price, round_currency, total_percentage};
