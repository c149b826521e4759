use serde::{Deserialize, Serialize};

/// Identifier for ranks in the catalog (e.g. `"warrior"`, `"mythic_honor"`).
pub type RankId = String;

/// Inclusive point window of a points-based rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRange {
    pub min: u32,
    pub max: u32,
}

impl PointsRange {
    pub fn contains(&self, points: u32) -> bool {
        points >= self.min && points <= self.max
    }
}

/// Direction in which a rank's subdivisions are climbed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubdivisionOrder {
    /// Index 0 is the lowest sub-tier.
    #[default]
    Ascending,
    /// Labels count down (V, IV, ... I): the last index is the entry sub-tier.
    Descending,
}

/// A sub-tier inside a rank, measured either in stars or in points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankSubdivision {
    pub name: String,
    #[serde(default)]
    pub stars: Option<u32>,
    #[serde(default)]
    pub points: Option<PointsRange>,
}

/// A named competitive tier as edited by the administrator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    pub id: RankId,
    pub name: String,
    pub tier: u32,
    /// Reserved multiplier; not part of the price formula.
    #[serde(default = "default_price_modifier")]
    pub price_modifier: f64,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub cost_per_star: f64,
    #[serde(default)]
    pub subdivisions: Vec<RankSubdivision>,
    #[serde(default)]
    pub points: Option<PointsRange>,
    #[serde(default)]
    pub subdivision_order: SubdivisionOrder,
}

fn default_price_modifier() -> f64 {
    1.0
}

impl Rank {
    /// Point window used for pricing: the rank's own range, otherwise the
    /// range carried by its single synthetic subdivision.
    pub fn points_range(&self) -> Option<PointsRange> {
        self.points.or_else(|| match self.subdivisions.as_slice() {
            [only] => only.points,
            _ => None,
        })
    }

    /// The one capability check for points-based pricing.
    pub fn is_points_based(&self) -> bool {
        self.points_range().is_some()
    }

    /// Stars in the subdivision at `index`, zero when absent or points-based.
    pub fn stars_in(&self, index: usize) -> u32 {
        self.subdivisions
            .get(index)
            .and_then(|sub| sub.stars)
            .unwrap_or(0)
    }

    pub fn total_stars(&self) -> u32 {
        self.subdivisions.iter().filter_map(|sub| sub.stars).sum()
    }

    /// Position of a subdivision index along the climb, 0 being the entry sub-tier.
    pub fn progression_step(&self, index: usize) -> usize {
        match self.subdivision_order {
            SubdivisionOrder::Ascending => index,
            SubdivisionOrder::Descending => self.subdivisions.len().saturating_sub(1 + index),
        }
    }

    /// Subdivision indices in the order they are climbed.
    pub fn climb_order(&self) -> Vec<usize> {
        let count = self.subdivisions.len();
        match self.subdivision_order {
            SubdivisionOrder::Ascending => (0..count).collect(),
            SubdivisionOrder::Descending => (0..count).rev().collect(),
        }
    }
}

/// Administrator-pinned price for one rank transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankCombination {
    #[serde(default)]
    pub id: Option<String>,
    pub from_rank_id: RankId,
    pub to_rank_id: RankId,
    /// `None` matches any sub-tier of the from rank.
    #[serde(default)]
    pub from_subdivision: Option<usize>,
    /// `None` matches any sub-tier of the to rank.
    #[serde(default)]
    pub to_subdivision: Option<usize>,
    pub price: f64,
}

impl RankCombination {
    /// Number of populated subdivision fields.
    pub fn specificity(&self) -> u8 {
        u8::from(self.from_subdivision.is_some()) + u8::from(self.to_subdivision.is_some())
    }
}

/// Optional add-on that scales the final price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOption {
    pub name: String,
    pub percentage_increase: f64,
    #[serde(default)]
    pub is_active: bool,
}

impl ServiceOption {
    pub fn new(name: impl Into<String>, percentage_increase: f64, is_active: bool) -> Self {
        Self {
            name: name.into(),
            percentage_increase,
            is_active,
        }
    }
}

/// Transient location on the ladder; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub rank_id: RankId,
    pub subdivision: usize,
    pub stars: u32,
    pub points: u32,
}
