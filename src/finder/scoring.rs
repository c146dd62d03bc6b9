//! Fit scoring
//!
//! Resorts get a weighted blend of four sub-scores, each bounded to
//! `0..=100`, so the blended fit is bounded too. Equipment relevance is the
//! review rating scaled to the same range.

use serde::Serialize;

use crate::catalog::{Ability, Equipment, Resort};

use super::criteria::FilterCriteria;

/// Snowfall (inches) that maps to a full snow score
pub const SNOWFALL_CEILING_IN: f64 = 600.0;
/// Snow score used when a resort reports no snowfall
pub const NEUTRAL_SNOW_SCORE: f64 = 60.0;

pub const BASE_WEIGHT: f64 = 0.40;
pub const POWDER_WEIGHT: f64 = 0.25;
pub const ABILITY_WEIGHT: f64 = 0.20;
pub const CROWD_WEIGHT: f64 = 0.15;

/// Crowd score subtracted for a fully packed resort
pub const CROWD_PENALTY_MAX: f64 = 20.0;

pub const MAX_RATING: f64 = 5.0;

const SCORE_BOUNDS: (f64, f64) = (0.0, 100.0);

fn bounded(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(SCORE_BOUNDS.0, SCORE_BOUNDS.1)
    } else {
        SCORE_BOUNDS.0
    }
}

fn to_fit(score: f64) -> u8 {
    // bounded() keeps this within u8 range
    bounded(score.round()) as u8
}

/// A catalog record with its derived fit score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem<T> {
    #[serde(flatten)]
    pub item: T,
    pub fit: u8,
}

/// Sub-scores behind a resort's fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitBreakdown {
    pub snow: f64,
    pub powder: f64,
    pub ability: f64,
    pub crowd: f64,
    pub fit: u8,
}

/// A zero or NaN average counts as unreported and scores neutral
fn snow_score(resort: &Resort) -> f64 {
    resort
        .snowfall_avg
        .filter(|snow| *snow != 0.0 && !snow.is_nan())
        .map_or(NEUTRAL_SNOW_SCORE, |snow| {
            bounded((snow.max(0.0) / SNOWFALL_CEILING_IN * 100.0).round())
        })
}

fn ability_table(ability: Ability) -> f64 {
    match ability {
        Ability::Beginner => 55.0,
        Ability::Intermediate => 65.0,
        Ability::Advanced => 75.0,
        Ability::Expert => 85.0,
    }
}

fn ability_score(resort: &Resort, ability: Ability) -> f64 {
    let table = ability_table(ability);
    match resort
        .terrain_mix
        .as_ref()
        .and_then(|mix| mix.share_for(ability))
    {
        Some(share) => (table + bounded(share)) / 2.0,
        None => table,
    }
}

fn crowd_score(resort: &Resort, tolerance: f64) -> f64 {
    let base = if tolerance >= 0.5 { 100.0 } else { 60.0 };
    let penalty = resort
        .crowd_level
        .map_or(0.0, |level| level.clamp(0.0, 1.0) * CROWD_PENALTY_MAX);
    bounded(base - penalty)
}

/// Scores a resort against the user's bias sliders and ability
#[must_use]
pub fn resort_fit(resort: &Resort, criteria: &FilterCriteria) -> FitBreakdown {
    let snow = snow_score(resort);
    let powder = snow * criteria.powder_bias();
    let ability = ability_score(resort, criteria.scoring_ability());
    let crowd = crowd_score(resort, criteria.crowd_tolerance());

    let blended = snow * BASE_WEIGHT
        + powder * POWDER_WEIGHT
        + ability * ABILITY_WEIGHT
        + crowd * CROWD_WEIGHT;

    FitBreakdown {
        snow,
        powder,
        ability,
        crowd,
        fit: to_fit(blended),
    }
}

/// Relevance of an equipment item: its rating out of 5 scaled to 0-100
#[must_use]
pub fn equipment_fit(item: &Equipment) -> u8 {
    item.rating
        .map_or(0, |rating| to_fit(rating / MAX_RATING * 100.0))
}

#[must_use]
pub fn score_resorts(resorts: Vec<Resort>, criteria: &FilterCriteria) -> Vec<ScoredItem<Resort>> {
    resorts
        .into_iter()
        .map(|resort| {
            let fit = resort_fit(&resort, criteria).fit;
            ScoredItem { item: resort, fit }
        })
        .collect()
}

#[must_use]
pub fn score_equipment(items: Vec<Equipment>) -> Vec<ScoredItem<Equipment>> {
    items
        .into_iter()
        .map(|item| {
            let fit = equipment_fit(&item);
            ScoredItem { item, fit }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TerrainMix, seed};
    use rstest::rstest;

    #[test]
    fn test_weights_sum_to_one() {
        let sum = BASE_WEIGHT + POWDER_WEIGHT + ABILITY_WEIGHT + CROWD_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_alta_breakdown() {
        let alta = seed::resorts().into_iter().find(|r| r.id == "alta").unwrap();
        let breakdown = resort_fit(&alta, &FilterCriteria::for_resorts());
        assert_eq!(breakdown.snow, 91.0);
        assert!((breakdown.powder - 63.7).abs() < 1e-9);
        assert_eq!(breakdown.ability, 47.5);
        assert_eq!(breakdown.crowd, 88.0);
        assert_eq!(breakdown.fit, 75);
    }

    #[test]
    fn test_snow_score_is_capped() {
        let deep = Resort {
            snowfall_avg: Some(1200.0),
            ..Default::default()
        };
        assert_eq!(snow_score(&deep), 100.0);

        let negative = Resort {
            snowfall_avg: Some(-50.0),
            ..Default::default()
        };
        assert_eq!(snow_score(&negative), 0.0);

        assert_eq!(snow_score(&Resort::default()), NEUTRAL_SNOW_SCORE);
    }

    #[rstest]
    #[case(Some(0.0))]
    #[case(Some(f64::NAN))]
    #[case(None)]
    fn test_unreported_snowfall_is_neutral(#[case] snowfall: Option<f64>) {
        let resort = Resort {
            snowfall_avg: snowfall,
            ..Default::default()
        };
        assert_eq!(snow_score(&resort), NEUTRAL_SNOW_SCORE);
    }

    #[rstest]
    #[case(Ability::Beginner, 55.0)]
    #[case(Ability::Intermediate, 65.0)]
    #[case(Ability::Advanced, 75.0)]
    #[case(Ability::Expert, 85.0)]
    fn test_ability_table_without_terrain_mix(#[case] ability: Ability, #[case] expected: f64) {
        assert_eq!(ability_score(&Resort::default(), ability), expected);
    }

    #[test]
    fn test_ability_blends_terrain_share() {
        let steep = Resort {
            terrain_mix: Some(TerrainMix {
                beg: Some(5.0),
                int: None,
                adv: Some(75.0),
            }),
            ..Default::default()
        };
        assert_eq!(ability_score(&steep, Ability::Expert), 80.0);
        assert_eq!(ability_score(&steep, Ability::Beginner), 30.0);
        assert_eq!(ability_score(&steep, Ability::Intermediate), 65.0);
    }

    #[rstest]
    #[case(0.5, None, 100.0)]
    #[case(0.49, None, 60.0)]
    #[case(1.0, Some(1.0), 80.0)]
    #[case(0.0, Some(0.5), 50.0)]
    #[case(0.0, Some(7.0), 40.0)]
    fn test_crowd_score(#[case] tolerance: f64, #[case] level: Option<f64>, #[case] expected: f64) {
        let resort = Resort {
            crowd_level: level,
            ..Default::default()
        };
        assert_eq!(crowd_score(&resort, tolerance), expected);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1.0, 1.0)]
    #[case(0.7, 0.2)]
    fn test_fit_bounded_for_all_seeds(#[case] powder: f64, #[case] tolerance: f64) {
        let mut resorts = seed::resorts();
        resorts.push(Resort {
            snowfall_avg: Some(f64::MAX),
            crowd_level: Some(-3.0),
            terrain_mix: Some(TerrainMix {
                beg: Some(500.0),
                int: Some(500.0),
                adv: Some(500.0),
            }),
            ..Default::default()
        });
        for ability in Ability::ALL {
            let criteria = FilterCriteria::for_resorts()
                .with_powder_bias(powder)
                .with_crowd_tolerance(tolerance)
                .with_ability(Some(ability));
            for scored in score_resorts(resorts.clone(), &criteria) {
                assert!(scored.fit <= 100, "{} scored {}", scored.item.id, scored.fit);
            }
        }
    }

    #[test]
    fn test_powder_bias_raises_fit_for_snowy_resorts() {
        let alta = seed::resorts().into_iter().find(|r| r.id == "alta").unwrap();
        let low = resort_fit(&alta, &FilterCriteria::for_resorts().with_powder_bias(0.0));
        let high = resort_fit(&alta, &FilterCriteria::for_resorts().with_powder_bias(1.0));
        assert!(high.fit > low.fit);
    }

    #[test]
    fn test_equipment_fit_scales_rating() {
        let fits: Vec<u8> = score_equipment(seed::equipment())
            .into_iter()
            .map(|s| s.fit)
            .collect();
        assert_eq!(fits, vec![94, 96, 92, 90]);
        assert_eq!(equipment_fit(&Equipment::default()), 0);
    }
}
