//! User filter selections
//!
//! Numeric selections are clamped to the slider bounds the finder screens
//! expose, so a `FilterCriteria` is always within range no matter where the
//! values came from (CLI flags, HTTP, stored defaults).

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::catalog::{Ability, EquipmentCategory, Terrain, label_matches};
use crate::preferences::UserPreferences;

/// Sentinel label for "no constraint"
pub const ANY: &str = "Any";

/// Pass selection matching resorts that sell no multi-resort pass
pub const NO_PASS: &str = "None";

pub const RESORT_BUDGET_BOUNDS: RangeInclusive<f64> = 80.0..=300.0;
pub const EQUIPMENT_BUDGET_BOUNDS: RangeInclusive<f64> = 200.0..=900.0;
pub const TRAVEL_HOURS_BOUNDS: RangeInclusive<f64> = 0.5..=6.0;
pub const LENGTH_BOUNDS_CM: RangeInclusive<f64> = 155.0..=190.0;
pub const BIAS_BOUNDS: RangeInclusive<f64> = 0.0..=1.0;

pub const DEFAULT_POWDER_BIAS: f64 = 0.7;
pub const DEFAULT_CROWD_TOLERANCE: f64 = 0.5;

/// Which finder screen the criteria belong to; selects slider bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinderScope {
    Resorts,
    Equipment,
}

impl FinderScope {
    #[must_use]
    pub fn budget_bounds(self) -> RangeInclusive<f64> {
        match self {
            FinderScope::Resorts => RESORT_BUDGET_BOUNDS,
            FinderScope::Equipment => EQUIPMENT_BUDGET_BOUNDS,
        }
    }
}

fn clamp_to(value: f64, bounds: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        *bounds.start()
    } else {
        value.clamp(*bounds.start(), *bounds.end())
    }
}

fn selection(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || label_matches(ANY, value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// The user's current constraint selections and bias sliders
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    scope: FinderScope,
    /// Free text search, sent to the catalog
    pub query: String,
    pub region: Option<String>,
    pub pass_type: Option<String>,
    pub ability: Option<Ability>,
    /// Empty means any terrain
    pub terrain: Vec<Terrain>,
    pub category: Option<EquipmentCategory>,
    budget: Option<f64>,
    max_travel_hours: Option<f64>,
    target_length_cm: Option<f64>,
    powder_bias: f64,
    crowd_tolerance: f64,
}

impl FilterCriteria {
    /// Criteria with every hard constraint inactive
    #[must_use]
    pub fn new(scope: FinderScope) -> Self {
        Self {
            scope,
            query: String::new(),
            region: None,
            pass_type: None,
            ability: None,
            terrain: Vec::new(),
            category: None,
            budget: None,
            max_travel_hours: None,
            target_length_cm: None,
            powder_bias: DEFAULT_POWDER_BIAS,
            crowd_tolerance: DEFAULT_CROWD_TOLERANCE,
        }
    }

    #[must_use]
    pub fn for_resorts() -> Self {
        Self::new(FinderScope::Resorts)
    }

    #[must_use]
    pub fn for_equipment() -> Self {
        Self::new(FinderScope::Equipment)
    }

    /// Seeds region and pass selections from stored preferences
    #[must_use]
    pub fn from_preferences(scope: FinderScope, prefs: &UserPreferences) -> Self {
        Self::new(scope)
            .with_region(&prefs.default_region)
            .with_pass_type(&prefs.default_pass)
    }

    #[must_use]
    pub fn scope(&self) -> FinderScope {
        self.scope
    }

    #[must_use]
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.trim().to_string();
        self
    }

    /// "Any" or an empty value clears the constraint
    #[must_use]
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = selection(region);
        self
    }

    /// "Any" or an empty value clears the constraint
    #[must_use]
    pub fn with_pass_type(mut self, pass: &str) -> Self {
        self.pass_type = selection(pass);
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Option<Ability>) -> Self {
        self.ability = ability;
        self
    }

    #[must_use]
    pub fn with_terrain(mut self, terrain: Vec<Terrain>) -> Self {
        self.terrain = terrain;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<EquipmentCategory>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_budget(mut self, budget: Option<f64>) -> Self {
        let bounds = self.scope.budget_bounds();
        self.budget = budget.map(|b| clamp_to(b, &bounds));
        self
    }

    #[must_use]
    pub fn with_max_travel_hours(mut self, hours: Option<f64>) -> Self {
        self.max_travel_hours = hours.map(|h| clamp_to(h, &TRAVEL_HOURS_BOUNDS));
        self
    }

    #[must_use]
    pub fn with_target_length(mut self, length_cm: Option<f64>) -> Self {
        self.target_length_cm = length_cm.map(|l| clamp_to(l, &LENGTH_BOUNDS_CM));
        self
    }

    #[must_use]
    pub fn with_powder_bias(mut self, bias: f64) -> Self {
        self.powder_bias = clamp_to(bias, &BIAS_BOUNDS);
        self
    }

    #[must_use]
    pub fn with_crowd_tolerance(mut self, tolerance: f64) -> Self {
        self.crowd_tolerance = clamp_to(tolerance, &BIAS_BOUNDS);
        self
    }

    #[must_use]
    pub fn budget(&self) -> Option<f64> {
        self.budget
    }

    #[must_use]
    pub fn max_travel_hours(&self) -> Option<f64> {
        self.max_travel_hours
    }

    #[must_use]
    pub fn target_length_cm(&self) -> Option<f64> {
        self.target_length_cm
    }

    #[must_use]
    pub fn powder_bias(&self) -> f64 {
        self.powder_bias
    }

    #[must_use]
    pub fn crowd_tolerance(&self) -> f64 {
        self.crowd_tolerance
    }

    /// Ability used for scoring when none is selected
    #[must_use]
    pub fn scoring_ability(&self) -> Ability {
        self.ability.unwrap_or(Ability::Intermediate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_are_inactive() {
        let criteria = FilterCriteria::for_resorts();
        assert!(criteria.region.is_none());
        assert!(criteria.pass_type.is_none());
        assert!(criteria.budget().is_none());
        assert!(criteria.max_travel_hours().is_none());
        assert!(criteria.terrain.is_empty());
        assert_eq!(criteria.powder_bias(), DEFAULT_POWDER_BIAS);
        assert_eq!(criteria.crowd_tolerance(), DEFAULT_CROWD_TOLERANCE);
        assert_eq!(criteria.scoring_ability(), Ability::Intermediate);
    }

    #[rstest]
    #[case(FinderScope::Resorts, 20.0, 80.0)]
    #[case(FinderScope::Resorts, 1000.0, 300.0)]
    #[case(FinderScope::Equipment, 100.0, 200.0)]
    #[case(FinderScope::Equipment, 650.0, 650.0)]
    #[case(FinderScope::Equipment, f64::NAN, 200.0)]
    fn test_budget_clamped_to_scope(
        #[case] scope: FinderScope,
        #[case] input: f64,
        #[case] expected: f64,
    ) {
        let criteria = FilterCriteria::new(scope).with_budget(Some(input));
        assert_eq!(criteria.budget(), Some(expected));
    }

    #[test]
    fn test_sliders_clamped() {
        let criteria = FilterCriteria::for_equipment()
            .with_target_length(Some(200.0))
            .with_max_travel_hours(Some(0.0))
            .with_powder_bias(1.5)
            .with_crowd_tolerance(-0.2);
        assert_eq!(criteria.target_length_cm(), Some(190.0));
        assert_eq!(criteria.max_travel_hours(), Some(0.5));
        assert_eq!(criteria.powder_bias(), 1.0);
        assert_eq!(criteria.crowd_tolerance(), 0.0);
    }

    #[rstest]
    #[case("Any", None)]
    #[case("any", None)]
    #[case("  ", None)]
    #[case("Utah", Some("Utah"))]
    fn test_region_selection(#[case] input: &str, #[case] expected: Option<&str>) {
        let criteria = FilterCriteria::for_resorts().with_region(input);
        assert_eq!(criteria.region.as_deref(), expected);
    }

    #[test]
    fn test_from_preferences() {
        let prefs = UserPreferences {
            default_region: "Colorado".to_string(),
            default_pass: "Epic".to_string(),
            ..Default::default()
        };
        let criteria = FilterCriteria::from_preferences(FinderScope::Resorts, &prefs);
        assert_eq!(criteria.region.as_deref(), Some("Colorado"));
        assert_eq!(criteria.pass_type.as_deref(), Some("Epic"));

        let defaults = FilterCriteria::from_preferences(
            FinderScope::Resorts,
            &UserPreferences::default(),
        );
        assert_eq!(defaults, FilterCriteria::for_resorts());
    }
}
