//! Resort and equipment finder
//!
//! Results are derived by a pure pipeline, re-run whenever the criteria or
//! the loaded catalog change: filter, then score, then rank.

pub mod criteria;
pub mod filter;
pub mod ranking;
pub mod scoring;
pub mod selection;

pub use criteria::{ANY, FilterCriteria, FinderScope, NO_PASS};
pub use filter::pass_list_matches;
pub use ranking::{EquipmentSort, TieBreak, rank_by_fit, sort_equipment};
pub use scoring::{FitBreakdown, ScoredItem, equipment_fit, resort_fit};
pub use selection::CompareSelection;

use tracing::debug;

use crate::catalog::{Equipment, Resort};

/// Filtered, scored and ranked resorts for the current criteria
#[must_use]
pub fn recompute_resorts(
    resorts: &[Resort],
    criteria: &FilterCriteria,
    tie_break: TieBreak,
) -> Vec<ScoredItem<Resort>> {
    let filtered: Vec<Resort> = filter::apply(resorts, criteria)
        .into_iter()
        .cloned()
        .collect();
    let mut scored = scoring::score_resorts(filtered, criteria);
    rank_by_fit(&mut scored, tie_break);
    debug!(
        candidates = resorts.len(),
        matched = scored.len(),
        "Recomputed resort results"
    );
    scored
}

/// Filtered and scored equipment in the requested display order
#[must_use]
pub fn recompute_equipment(
    items: &[Equipment],
    criteria: &FilterCriteria,
    sort: EquipmentSort,
) -> Vec<ScoredItem<Equipment>> {
    let filtered: Vec<Equipment> = filter::apply(items, criteria)
        .into_iter()
        .cloned()
        .collect();
    let mut scored = scoring::score_equipment(filtered);
    sort_equipment(&mut scored, sort);
    debug!(
        candidates = items.len(),
        matched = scored.len(),
        sort = %sort,
        "Recomputed equipment results"
    );
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Ability, Terrain, seed};

    #[test]
    fn test_recompute_resorts_default_criteria() {
        let resorts = seed::resorts();
        let ranked = recompute_resorts(&resorts, &FilterCriteria::for_resorts(), TieBreak::default());
        assert_eq!(ranked.len(), resorts.len());
        assert!(ranked.windows(2).all(|w| w[0].fit >= w[1].fit));
        assert!(ranked.iter().all(|s| s.fit <= 100));
    }

    #[test]
    fn test_recompute_resorts_is_pure() {
        let resorts = seed::resorts();
        let criteria = FilterCriteria::for_resorts()
            .with_pass_type("Ikon")
            .with_powder_bias(1.0)
            .with_ability(Some(Ability::Expert));
        let first = recompute_resorts(&resorts, &criteria, TieBreak::Id);
        let second = recompute_resorts(&resorts, &criteria, TieBreak::Id);
        assert_eq!(first, second);
        assert!(first.iter().all(|s| {
            s.item
                .pass_types
                .as_ref()
                .is_some_and(|p| p.iter().any(|x| x == "Ikon"))
        }));
    }

    #[test]
    fn test_recompute_equipment() {
        let items = seed::equipment();
        let criteria = FilterCriteria::for_equipment()
            .with_ability(Some(Ability::Intermediate))
            .with_terrain(vec![Terrain::AllMountain])
            .with_target_length(Some(175.0))
            .with_budget(Some(650.0));
        let ranked = recompute_equipment(&items, &criteria, EquipmentSort::BestMatch);
        let ids: Vec<_> = ranked.iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, vec!["qst-98", "hawx-110", "griffon-13"]);

        let cheap = FilterCriteria::for_equipment().with_budget(Some(200.0));
        assert!(recompute_equipment(&items, &cheap, EquipmentSort::BestMatch).is_empty());
    }
}
