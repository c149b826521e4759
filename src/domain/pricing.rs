//! Base price for a rank transition: eligibility, overrides, then formula.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::RankCatalog;
use super::entities::{Position, Rank, RankCombination, SubdivisionOrder};
use super::outcome::Priced;
use super::overrides::{find_override, OverridePolicy, OverrideQuery};
use super::progression::{points_progress, star_distance};

/// Currency units charged per point of points-based progress.
pub const DEFAULT_PER_POINT_RATE: f64 = 3.0;

/// Catalog and override table read for one calculation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PricingSnapshot {
    pub catalog: RankCatalog,
    pub combinations: Vec<RankCombination>,
}

impl PricingSnapshot {
    pub fn new(catalog: RankCatalog, combinations: Vec<RankCombination>) -> Self {
        Self {
            catalog,
            combinations,
        }
    }
}

/// A caller's selection. Subdivision, star and point fields default to 0.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceRequest {
    pub current_rank: Rank,
    pub target_rank: Rank,
    pub current_subdivision: usize,
    pub target_subdivision: usize,
    pub current_stars: u32,
    pub target_stars: u32,
    pub current_points: u32,
    pub target_points: u32,
}

impl PriceRequest {
    pub fn new(current_rank: Rank, target_rank: Rank) -> Self {
        Self {
            current_rank,
            target_rank,
            current_subdivision: 0,
            target_subdivision: 0,
            current_stars: 0,
            target_stars: 0,
            current_points: 0,
            target_points: 0,
        }
    }

    pub fn from_position(mut self, subdivision: usize, stars: u32) -> Self {
        self.current_subdivision = subdivision;
        self.current_stars = stars;
        self
    }

    pub fn to_position(mut self, subdivision: usize, stars: u32) -> Self {
        self.target_subdivision = subdivision;
        self.target_stars = stars;
        self
    }

    pub fn points(mut self, current_points: u32, target_points: u32) -> Self {
        self.current_points = current_points;
        self.target_points = target_points;
        self
    }

    fn current_position(&self, rank: &Rank) -> Position {
        Position {
            rank_id: rank.id.clone(),
            subdivision: self.current_subdivision,
            stars: self.current_stars,
            points: self.current_points,
        }
    }

    fn target_position(&self, rank: &Rank) -> Position {
        Position {
            rank_id: rank.id.clone(),
            subdivision: self.target_subdivision,
            stars: self.target_stars,
            points: self.target_points,
        }
    }
}

/// Why a selection cannot be priced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    /// The current rank sits on a higher tier than the target.
    BackwardTier,
    /// Descending-ordered rank whose target subdivision comes earlier in the climb.
    BackwardWithinRank,
    /// Same position or the target is already reached.
    NoProgression,
}

/// Which branch produced the base price.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "price", rename_all = "snake_case")]
pub enum BaseOutcome {
    NotEligible(IneligibleReason),
    Override(f64),
    Formula(f64),
}

impl BaseOutcome {
    /// The base price; 0 when the selection is not eligible.
    pub fn amount(&self) -> f64 {
        match self {
            Self::NotEligible(_) => 0.0,
            Self::Override(price) | Self::Formula(price) => *price,
        }
    }

    pub fn is_eligible(&self) -> bool {
        !matches!(self, Self::NotEligible(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingEngine {
    pub per_point_rate: f64,
    pub override_policy: OverridePolicy,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self {
            per_point_rate: DEFAULT_PER_POINT_RATE,
            override_policy: OverridePolicy::default(),
        }
    }
}

impl PricingEngine {
    pub fn new(per_point_rate: f64, override_policy: OverridePolicy) -> Self {
        Self {
            per_point_rate,
            override_policy,
        }
    }

    pub fn calculate(
        &self,
        snapshot: &PricingSnapshot,
        request: &PriceRequest,
    ) -> Priced<BaseOutcome> {
        let catalog = &snapshot.catalog;
        let (current, mut degradations) = catalog.resolve(&request.current_rank).into_parts();
        let (target, target_degradations) = catalog.resolve(&request.target_rank).into_parts();
        degradations.extend(target_degradations);

        let outcome = self.price_resolved(snapshot, request, &current, &target);
        debug!(
            from = %current.id,
            to = %target.id,
            ?outcome,
            "[pricing] Calculated base price"
        );
        Priced::new(outcome, degradations)
    }

    fn price_resolved(
        &self,
        snapshot: &PricingSnapshot,
        request: &PriceRequest,
        current: &Rank,
        target: &Rank,
    ) -> BaseOutcome {
        if let Some(reason) = ineligibility(request, current, target) {
            return BaseOutcome::NotEligible(reason);
        }

        let query = OverrideQuery {
            from_rank_id: &current.id,
            from_subdivision: request.current_subdivision,
            to_rank_id: &target.id,
            to_subdivision: request.target_subdivision,
        };
        let combination = find_override(&query, &snapshot.combinations, self.override_policy);
        if let Some(combination) = combination {
            return BaseOutcome::Override(combination.price);
        }

        let mut price = current.base_price;
        if !current.is_points_based() && !target.is_points_based() {
            let stars = star_distance(
                &snapshot.catalog,
                current,
                &request.current_position(current),
                target,
                &request.target_position(target),
            )
            .max(0);
            price += stars as f64 * current.cost_per_star;
        } else {
            let points = points_progress(
                current,
                target,
                request.current_points,
                request.target_points,
            );
            price += self.per_point_rate * f64::from(points);
        }
        price += target.base_price;

        BaseOutcome::Formula(price)
    }
}

fn ineligibility(
    request: &PriceRequest,
    current: &Rank,
    target: &Rank,
) -> Option<IneligibleReason> {
    if current.tier > target.tier {
        return Some(IneligibleReason::BackwardTier);
    }
    if current.id != target.id {
        return None;
    }

    if current.is_points_based() {
        return (request.current_points >= request.target_points)
            .then_some(IneligibleReason::NoProgression);
    }

    let current_step = current.progression_step(request.current_subdivision);
    let target_step = current.progression_step(request.target_subdivision);
    let descending = current.subdivision_order == SubdivisionOrder::Descending;
    if descending && current_step > target_step {
        Some(IneligibleReason::BackwardWithinRank)
    } else if current_step == target_step && request.current_stars >= request.target_stars {
        Some(IneligibleReason::NoProgression)
    } else {
        None
    }
}

/// Prices `request` against `snapshot` with the default engine settings.
pub fn calculate_price(snapshot: &PricingSnapshot, request: &PriceRequest) -> Priced<BaseOutcome> {
    PricingEngine::default().calculate(snapshot, request)
}
