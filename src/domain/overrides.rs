//! Lookup of administrator-pinned transition prices.

use serde::{Deserialize, Serialize};

use super::entities::RankCombination;

/// How to choose between several matching combinations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// The first match in table order wins.
    #[default]
    FirstFound,
    /// The match with the most pinned subdivisions wins; table order breaks ties.
    MostSpecific,
}

/// The transition being priced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverrideQuery<'a> {
    pub from_rank_id: &'a str,
    pub from_subdivision: usize,
    pub to_rank_id: &'a str,
    pub to_subdivision: usize,
}

impl OverrideQuery<'_> {
    pub fn matches(&self, combination: &RankCombination) -> bool {
        combination.from_rank_id == self.from_rank_id
            && combination.to_rank_id == self.to_rank_id
            && combination
                .from_subdivision
                .map_or(true, |sub| sub == self.from_subdivision)
            && combination
                .to_subdivision
                .map_or(true, |sub| sub == self.to_subdivision)
    }
}

pub fn find_override<'c>(
    query: &OverrideQuery<'_>,
    combinations: &'c [RankCombination],
    policy: OverridePolicy,
) -> Option<&'c RankCombination> {
    let mut candidates = combinations.iter().filter(|combo| query.matches(combo));
    match policy {
        OverridePolicy::FirstFound => candidates.next(),
        OverridePolicy::MostSpecific => candidates.fold(None, |best, combo| match best {
            Some(current) if current.specificity() >= combo.specificity() => Some(current),
            _ => Some(combo),
        }),
    }
}
