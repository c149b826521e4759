//! Priced selection handed to the checkout collaborator.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::entities::{RankId, ServiceOption};
use super::outcome::Priced;
use super::pricing::{BaseOutcome, PriceRequest};
use super::service_options::{calculate_final_price, total_percentage};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub from_rank_id: RankId,
    pub to_rank_id: RankId,
    pub base: BaseOutcome,
    pub surcharge_percentage: f64,
    pub active_options: Vec<String>,
    pub final_price: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Reasons a default was substituted while pricing, if any.
    #[serde(default)]
    pub degradations: Vec<String>,
}

impl Quote {
    /// Applies `options` on top of `base`, whatever branch produced it.
    pub fn new(
        request: &PriceRequest,
        base: Priced<BaseOutcome>,
        options: &[ServiceOption],
    ) -> Self {
        let (base, degradations) = base.into_parts();
        Self {
            id: Uuid::new_v4(),
            from_rank_id: request.current_rank.id.clone(),
            to_rank_id: request.target_rank.id.clone(),
            base,
            surcharge_percentage: total_percentage(options),
            active_options: options
                .iter()
                .filter(|option| option.is_active)
                .map(|option| option.name.clone())
                .collect(),
            final_price: calculate_final_price(base.amount(), options),
            created_at: OffsetDateTime::now_utc(),
            degradations: degradations.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    /// Checkout must be blocked for zero-priced quotes.
    pub fn checkout_ready(&self) -> bool {
        self.base.is_eligible() && self.final_price > 0.0
    }
}
