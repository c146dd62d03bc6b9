//! Buy-vs-rent projection
//!
//! Models cumulative discounted cost of owning gear against renting it over
//! a number of seasons. Out-of-range inputs are clamped, never rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Final ownership must be under this share of final rental for a "Buy"
pub const BUY_THRESHOLD: f64 = 0.95;

/// Range the planner screen offers for the days sensitivity
pub const SENSITIVITY_MIN: f64 = -50.0;
pub const SENSITIVITY_MAX: f64 = 50.0;

/// Inputs of the ROI planner. Fractions (`resalePct`, `discountPct`) are in `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoiInputs {
    pub days_per_season: f64,
    pub seasons: i64,
    pub gear_cost: f64,
    pub resale_pct: f64,
    pub maint_per_season: f64,
    pub rental_per_day: f64,
    pub pass_cost: f64,
    pub travel_per_day: f64,
    pub discount_pct: f64,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            days_per_season: 12.0,
            seasons: 5,
            gear_cost: 1600.0,
            resale_pct: 0.35,
            maint_per_season: 120.0,
            rental_per_day: 55.0,
            pass_cost: 850.0,
            travel_per_day: 40.0,
            discount_pct: 0.08,
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

fn fraction(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

fn nan_to_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

impl RoiInputs {
    /// Copy with every field moved into its valid range
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            days_per_season: non_negative(self.days_per_season),
            seasons: self.seasons.max(1),
            gear_cost: non_negative(self.gear_cost),
            resale_pct: fraction(self.resale_pct),
            maint_per_season: non_negative(self.maint_per_season),
            rental_per_day: non_negative(self.rental_per_day),
            pass_cost: non_negative(self.pass_cost),
            travel_per_day: non_negative(self.travel_per_day),
            discount_pct: fraction(self.discount_pct),
        }
    }
}

/// Ski days per season after applying the sensitivity percentage
#[must_use]
pub fn effective_days(days_per_season: f64, sensitivity_percent: f64) -> f64 {
    let adjusted = non_negative(days_per_season) * (1.0 + nan_to_zero(sensitivity_percent) / 100.0);
    adjusted.round().max(0.0)
}

/// One modeled season. Cumulative figures are floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiYearPoint {
    pub year: u32,
    pub ownership: f64,
    pub rental: f64,
    pub annual_ownership: f64,
    pub annual_rental: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiProjection {
    pub days_per_season: f64,
    pub series: Vec<RoiYearPoint>,
    pub break_even_year: Option<u32>,
}

impl RoiProjection {
    #[must_use]
    pub fn final_point(&self) -> Option<&RoiYearPoint> {
        self.series.last()
    }
}

/// Projects cumulative discounted ownership and rental cost per season.
///
/// The gear cost is paid upfront before year 1. Resale value, discounted to
/// present value, is credited in the final year only. Break-even is the
/// first year where ownership is at or below rental.
#[must_use]
pub fn project(inputs: &RoiInputs, sensitivity_percent: f64) -> RoiProjection {
    let inputs = inputs.sanitized();
    let days = effective_days(inputs.days_per_season, sensitivity_percent);
    let growth = 1.0 + inputs.discount_pct;
    let seasons = u32::try_from(inputs.seasons).unwrap_or(u32::MAX);

    let mut ownership = inputs.gear_cost;
    let mut rental = 0.0;
    let mut series = Vec::new();

    for year in 1..=seasons {
        let discount = 1.0 / growth.powf(f64::from(year - 1));
        let travel = inputs.travel_per_day * days;
        let annual_ownership = (inputs.maint_per_season + inputs.pass_cost + travel) * discount;
        let annual_rental = (inputs.rental_per_day * days + inputs.pass_cost + travel) * discount;

        ownership += annual_ownership;
        rental += annual_rental;

        let resale_credit = if year == seasons {
            inputs.gear_cost * inputs.resale_pct / growth.powf(f64::from(year))
        } else {
            0.0
        };

        series.push(RoiYearPoint {
            year,
            ownership: (ownership - resale_credit).max(0.0),
            rental: rental.max(0.0),
            annual_ownership,
            annual_rental,
        });
    }

    let break_even_year = series
        .iter()
        .find(|point| point.ownership <= point.rental)
        .map(|point| point.year);

    RoiProjection {
        days_per_season: days,
        series,
        break_even_year,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationTone {
    Buy,
    Rent,
    Balanced,
}

impl fmt::Display for RecommendationTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecommendationTone::Buy => "Buy",
            RecommendationTone::Rent => "Rent",
            RecommendationTone::Balanced => "Balanced",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tone: RecommendationTone,
    pub detail: String,
}

impl Recommendation {
    #[must_use]
    pub fn for_projection(projection: &RoiProjection) -> Self {
        let seasons = projection.series.len();
        let days = projection.days_per_season;
        let (final_ownership, final_rental) = projection
            .final_point()
            .map_or((0.0, 0.0), |p| (p.ownership, p.rental));

        if projection.break_even_year == Some(1) || final_ownership < final_rental * BUY_THRESHOLD {
            Self {
                tone: RecommendationTone::Buy,
                detail: format!("Ownership wins over {seasons} seasons at {days} days/season."),
            }
        } else if let Some(year) = projection.break_even_year {
            Self {
                tone: RecommendationTone::Balanced,
                detail: format!("You break even around year {year}. Either path works."),
            }
        } else {
            Self {
                tone: RecommendationTone::Rent,
                detail: "Renting stays cheaper given your days and costs.".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_default_scenario_first_year() {
        let projection = project(&RoiInputs::default(), 0.0);
        let first = projection.series[0];
        assert_eq!(first.year, 1);
        assert_eq!(first.ownership, 3050.0);
        assert_eq!(first.rental, 1990.0);
        assert_eq!(first.annual_ownership, 1450.0);
        assert_eq!(first.annual_rental, 1990.0);
    }

    #[test]
    fn test_default_scenario_series() {
        let projection = project(&RoiInputs::default(), 0.0);
        assert_eq!(projection.series.len(), 5);
        assert_eq!(projection.break_even_year, Some(4));

        let third = projection.series[2];
        assert!(close(third.ownership, 5635.73));
        assert!(close(third.rental, 5538.70));

        let last = projection.final_point().unwrap();
        assert!(close(last.ownership, 7471.46));
        assert!(close(last.rental, 8581.13));

        let recommendation = Recommendation::for_projection(&projection);
        assert_eq!(recommendation.tone, RecommendationTone::Buy);
        assert_eq!(
            recommendation.detail,
            "Ownership wins over 5 seasons at 12 days/season."
        );
    }

    #[rstest]
    #[case(-2, 1)]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(3, 3)]
    #[case(10, 10)]
    #[case(150, 150)]
    fn test_series_length_and_upfront_cost(#[case] seasons: i64, #[case] expected: usize) {
        let inputs = RoiInputs {
            seasons,
            ..Default::default()
        };
        let projection = project(&inputs, 0.0);
        assert_eq!(projection.series.len(), expected);
        if expected > 1 {
            assert!(projection.series[0].ownership >= inputs.gear_cost);
        }
    }

    #[test]
    fn test_no_break_even_when_rental_is_free() {
        let inputs = RoiInputs {
            rental_per_day: 0.0,
            gear_cost: 1_000_000.0,
            ..Default::default()
        };
        let projection = project(&inputs, 0.0);
        assert_eq!(projection.break_even_year, None);

        let recommendation = Recommendation::for_projection(&projection);
        assert_eq!(recommendation.tone, RecommendationTone::Rent);
        assert_eq!(
            recommendation.detail,
            "Renting stays cheaper given your days and costs."
        );
    }

    #[test]
    fn test_balanced_recommendation() {
        let inputs = RoiInputs {
            days_per_season: 3.0,
            seasons: 4,
            gear_cost: 1000.0,
            resale_pct: 0.0,
            maint_per_season: 0.0,
            rental_per_day: 85.0,
            pass_cost: 0.0,
            travel_per_day: 0.0,
            discount_pct: 0.0,
        };
        let projection = project(&inputs, 0.0);
        assert_eq!(projection.break_even_year, Some(4));
        let last = projection.final_point().unwrap();
        assert_eq!(last.ownership, 1000.0);
        assert_eq!(last.rental, 1020.0);

        let recommendation = Recommendation::for_projection(&projection);
        assert_eq!(recommendation.tone, RecommendationTone::Balanced);
        assert_eq!(
            recommendation.detail,
            "You break even around year 4. Either path works."
        );
    }

    #[rstest]
    #[case(0.0, 12.0, Some(4), RecommendationTone::Buy)]
    #[case(-50.0, 6.0, None, RecommendationTone::Rent)]
    #[case(50.0, 18.0, Some(2), RecommendationTone::Buy)]
    #[case(-80.0, 2.0, None, RecommendationTone::Rent)]
    #[case(-150.0, 0.0, None, RecommendationTone::Rent)]
    #[case(100.0, 24.0, Some(2), RecommendationTone::Buy)]
    fn test_sensitivity(
        #[case] sensitivity: f64,
        #[case] days: f64,
        #[case] break_even: Option<u32>,
        #[case] tone: RecommendationTone,
    ) {
        let projection = project(&RoiInputs::default(), sensitivity);
        assert_eq!(projection.days_per_season, days);
        assert_eq!(projection.break_even_year, break_even);
        assert_eq!(Recommendation::for_projection(&projection).tone, tone);
    }

    #[test]
    fn test_resale_applies_to_final_year_only() {
        let inputs = RoiInputs {
            seasons: 3,
            ..Default::default()
        };
        let projection = project(&inputs, 0.0);
        assert!(close(projection.series[1].ownership, 4392.59));
        assert!(close(projection.series[2].ownership, 5191.19));
        assert_eq!(projection.break_even_year, Some(3));
    }

    #[test]
    fn test_invalid_inputs_are_clamped() {
        let inputs = RoiInputs {
            days_per_season: -4.0,
            seasons: 0,
            gear_cost: -100.0,
            resale_pct: 3.0,
            maint_per_season: f64::NAN,
            rental_per_day: -1.0,
            pass_cost: -850.0,
            travel_per_day: -40.0,
            discount_pct: -0.5,
        };
        let sanitized = inputs.sanitized();
        assert_eq!(sanitized.seasons, 1);
        assert_eq!(sanitized.gear_cost, 0.0);
        assert_eq!(sanitized.resale_pct, 1.0);
        assert_eq!(sanitized.maint_per_season, 0.0);
        assert_eq!(sanitized.discount_pct, 0.0);

        let projection = project(&inputs, 0.0);
        assert_eq!(projection.series.len(), 1);
        assert!(projection.series.iter().all(|p| p.ownership >= 0.0 && p.rental >= 0.0));
    }

    #[rstest]
    #[case(12.0, 0.0, 12.0)]
    #[case(12.0, 25.0, 15.0)]
    #[case(5.0, 10.0, 6.0)]
    #[case(-3.0, 0.0, 0.0)]
    #[case(12.0, -80.0, 2.0)]
    #[case(12.0, -200.0, 0.0)]
    #[case(12.0, f64::NAN, 12.0)]
    fn test_effective_days(#[case] days: f64, #[case] sensitivity: f64, #[case] expected: f64) {
        assert_eq!(effective_days(days, sensitivity), expected);
    }

    #[test]
    fn test_inputs_json_is_camel_case_with_defaults() {
        let inputs: RoiInputs =
            serde_json::from_str(r#"{"daysPerSeason": 20, "gearCost": 900}"#).unwrap();
        assert_eq!(inputs.days_per_season, 20.0);
        assert_eq!(inputs.gear_cost, 900.0);
        assert_eq!(inputs.seasons, 5);
        assert_eq!(inputs.discount_pct, 0.08);
    }
}
