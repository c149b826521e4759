//! Tier-ordered rank catalog snapshots and rank resolution.

use tracing::{debug, warn};

use super::entities::{Rank, RankId};
use super::outcome::{Degradation, Priced};
use crate::util::assets::default_catalog_ranks;

/// Immutable snapshot of the rank ladder, sorted by tier.
#[derive(Clone, Debug, PartialEq)]
pub struct RankCatalog {
    ranks: Vec<Rank>,
}

impl RankCatalog {
    pub fn new(mut ranks: Vec<Rank>) -> Self {
        ranks.sort_by_key(|rank| rank.tier);
        Self { ranks }
    }

    /// The catalog compiled into the crate.
    pub fn builtin() -> Self {
        Self::new(default_catalog_ranks().to_vec())
    }

    /// Uses `external` unless it is empty, in which case the built-in catalog applies.
    pub fn with_fallback(external: Vec<Rank>) -> Self {
        if external.is_empty() {
            debug!("[catalog] External catalog empty, using built-in ranks");
            Self::builtin()
        } else {
            Self::new(external)
        }
    }

    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Rank> {
        self.ranks.iter().find(|rank| rank.id == id)
    }

    /// Ranks whose tier lies strictly between `lower` and `upper`.
    pub fn between(&self, lower: u32, upper: u32) -> impl Iterator<Item = &Rank> {
        self.ranks
            .iter()
            .filter(move |rank| rank.tier > lower && rank.tier < upper)
    }

    /// Authoritative record for `supplied.id`.
    ///
    /// Prefers this snapshot, then the built-in catalog, and finally the
    /// caller's own record, which is reported as a degradation.
    pub fn resolve(&self, supplied: &Rank) -> Priced<Rank> {
        if let Some(rank) = self.get(&supplied.id) {
            return Priced::Ok(rank.clone());
        }

        if let Some(rank) = default_catalog_ranks()
            .iter()
            .find(|rank| rank.id == supplied.id)
        {
            debug!(rank_id = %supplied.id, "[catalog] Resolved rank from built-in catalog");
            return Priced::Ok(rank.clone());
        }

        warn!(rank_id = %supplied.id, "[catalog] Unknown rank, pricing with supplied record");
        Priced::Degraded(
            supplied.clone(),
            vec![Degradation::MalformedRankReference {
                rank_id: supplied.id.clone(),
            }],
        )
    }

    pub fn ids(&self) -> impl Iterator<Item = &RankId> {
        self.ranks.iter().map(|rank| &rank.id)
    }
}

impl Default for RankCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
