//! Distance between two ladder positions, in stars or points.
//!
//! Subdivisions are walked in climb order (see [`Rank::climb_order`]), so
//! descending-labelled ranks share the same arithmetic as ascending ones:
//! - remaining stars in the starting subdivision,
//! - full subdivisions strictly between the two positions,
//! - stars already gained in the target subdivision.
//!
//! Ascending ranks walk indices from 0 upward. Descending ranks reverse the
//! walk: they are entered at their last index and finished at index 0.

use super::catalog::RankCatalog;
use super::entities::{Position, Rank};

/// Stars of progress from `from` to `to`. May be negative for a
/// non-advancing same-subdivision pair; callers treat that as ineligible.
pub fn star_distance(
    catalog: &RankCatalog,
    from_rank: &Rank,
    from: &Position,
    to_rank: &Rank,
    to: &Position,
) -> i64 {
    let current_step = from_rank.progression_step(from.subdivision);
    let target_step = to_rank.progression_step(to.subdivision);

    if from_rank.id == to_rank.id {
        if current_step == target_step {
            return i64::from(to.stars) - i64::from(from.stars);
        }

        let remaining = remaining_in_subdivision(from_rank, from);
        let between = stars_over_steps(from_rank, current_step + 1, target_step);
        return remaining + between + i64::from(to.stars);
    }

    let remaining = remaining_in_subdivision(from_rank, from)
        + stars_over_steps(from_rank, current_step + 1, from_rank.subdivisions.len());
    let intermediate: i64 = catalog
        .between(from_rank.tier, to_rank.tier)
        .map(|rank| i64::from(rank.total_stars()))
        .sum();
    let accumulated = stars_over_steps(to_rank, 0, target_step) + i64::from(to.stars);

    remaining + intermediate + accumulated
}

/// Billable points when at least one endpoint is points-based.
///
/// Within one points tier only the gained points count; entering a tier from
/// below counts from that tier's floor. A star-based target yields nothing.
pub fn points_progress(
    from_rank: &Rank,
    to_rank: &Rank,
    current_points: u32,
    target_points: u32,
) -> u32 {
    let Some(target_range) = to_rank.points_range() else {
        return 0;
    };

    if from_rank.is_points_based() && from_rank.tier == to_rank.tier {
        target_points.saturating_sub(current_points)
    } else {
        target_points.saturating_sub(target_range.min)
    }
}

fn remaining_in_subdivision(rank: &Rank, position: &Position) -> i64 {
    i64::from(rank.stars_in(position.subdivision)) - i64::from(position.stars)
}

/// Total stars of subdivisions whose climb step lies in `start..end`.
fn stars_over_steps(rank: &Rank, start: usize, end: usize) -> i64 {
    if start >= end {
        return 0;
    }
    rank.climb_order()
        .into_iter()
        .skip(start)
        .take(end - start)
        .map(|index| i64::from(rank.stars_in(index)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PointsRange, RankSubdivision, SubdivisionOrder};

    fn star_rank(id: &str, tier: u32, subs: usize, stars: u32, order: SubdivisionOrder) -> Rank {
        Rank {
            id: id.into(),
            name: id.into(),
            tier,
            price_modifier: 1.0,
            base_price: 0.0,
            cost_per_star: 1.0,
            subdivisions: (0..subs)
                .map(|i| RankSubdivision {
                    name: format!("{id}-{i}"),
                    stars: Some(stars),
                    points: None,
                })
                .collect(),
            points: None,
            subdivision_order: order,
        }
    }

    fn points_rank(id: &str, tier: u32, min: u32, max: u32) -> Rank {
        Rank {
            points: Some(PointsRange { min, max }),
            ..star_rank(id, tier, 0, 0, SubdivisionOrder::Ascending)
        }
    }

    fn at(rank: &Rank, subdivision: usize, stars: u32) -> Position {
        Position {
            rank_id: rank.id.clone(),
            subdivision,
            stars,
            points: 0,
        }
    }

    fn ladder() -> RankCatalog {
        RankCatalog::new(vec![
            star_rank("warrior", 1, 3, 3, SubdivisionOrder::Ascending),
            star_rank("elite", 2, 4, 3, SubdivisionOrder::Ascending),
            star_rank("master", 3, 4, 4, SubdivisionOrder::Ascending),
        ])
    }

    #[test]
    fn same_subdivision_is_plain_difference() {
        let catalog = ladder();
        let warrior = catalog.get("warrior").unwrap();
        let (low, high) = (at(warrior, 1, 1), at(warrior, 1, 3));
        let up = star_distance(&catalog, warrior, &low, warrior, &high);
        let down = star_distance(&catalog, warrior, &high, warrior, &low);
        assert_eq!(up, 2);
        assert_eq!(down, -2);
    }

    #[test]
    fn same_rank_counts_remaining_between_and_gained() {
        let catalog = ladder();
        let warrior = catalog.get("warrior").unwrap();
        let (from, to) = (at(warrior, 0, 1), at(warrior, 2, 2));
        let distance = star_distance(&catalog, warrior, &from, warrior, &to);
        assert_eq!(distance, 7);
    }

    #[test]
    fn adjacent_ranks_skip_nothing() {
        let catalog = ladder();
        let warrior = catalog.get("warrior").unwrap();
        let elite = catalog.get("elite").unwrap();
        // (3 - 2) + 3 remaining in warrior, then 3 + 1 into elite.
        let (from, to) = (at(warrior, 1, 2), at(elite, 1, 1));
        let distance = star_distance(&catalog, warrior, &from, elite, &to);
        assert_eq!(distance, 8);
    }

    #[test]
    fn intermediate_ranks_count_in_full() {
        let catalog = ladder();
        let warrior = catalog.get("warrior").unwrap();
        let master = catalog.get("master").unwrap();
        // 3 remaining in warrior, 12 for elite, 2 into master.
        let (from, to) = (at(warrior, 2, 0), at(master, 0, 2));
        let distance = star_distance(&catalog, warrior, &from, master, &to);
        assert_eq!(distance, 17);
    }

    #[test]
    fn distances_compose_within_a_rank() {
        let catalog = ladder();
        let elite = catalog.get("elite").unwrap();
        let a = at(elite, 0, 1);
        let b = at(elite, 1, 2);
        let c = at(elite, 3, 1);
        let ab = star_distance(&catalog, elite, &a, elite, &b);
        let bc = star_distance(&catalog, elite, &b, elite, &c);
        let ac = star_distance(&catalog, elite, &a, elite, &c);
        assert_eq!(ab + bc, ac);
    }

    #[test]
    fn descending_rank_walks_from_last_index() {
        let legend = star_rank("legend", 6, 5, 5, SubdivisionOrder::Descending);
        let epic = star_rank("epic", 5, 5, 5, SubdivisionOrder::Ascending);
        let catalog = RankCatalog::new(vec![epic.clone(), legend.clone()]);

        // Legend V (index 4) to Legend III (index 2): 4 + 5 + 3.
        let (from, to) = (at(&legend, 4, 1), at(&legend, 2, 3));
        let within = star_distance(&catalog, &legend, &from, &legend, &to);
        assert_eq!(within, 12);

        // Epic I (index 4) to Legend IV (index 3): 3 remaining, 5 for Legend V, 2 gained.
        let (from, to) = (at(&epic, 4, 2), at(&legend, 3, 2));
        let across = star_distance(&catalog, &epic, &from, &legend, &to);
        assert_eq!(across, 10);
    }

    #[test]
    fn points_within_tier_count_gain_only() {
        let mythic = points_rank("mythic", 7, 0, 24);
        assert_eq!(points_progress(&mythic, &mythic, 5, 20), 15);
        assert_eq!(points_progress(&mythic, &mythic, 20, 5), 0);
    }

    #[test]
    fn points_across_tiers_count_from_target_floor() {
        let mythic = points_rank("mythic", 7, 0, 24);
        let honor = points_rank("mythic_honor", 8, 25, 49);
        let legend = star_rank("legend", 6, 5, 5, SubdivisionOrder::Descending);
        assert_eq!(points_progress(&mythic, &honor, 10, 30), 5);
        assert_eq!(points_progress(&legend, &honor, 0, 30), 5);
        assert_eq!(points_progress(&legend, &honor, 0, 20), 0);
        assert_eq!(points_progress(&mythic, &legend, 10, 0), 0);
    }
}
