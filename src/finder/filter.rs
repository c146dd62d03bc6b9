//! Hard-constraint filtering
//!
//! An item passes when every active constraint matches. Inactive constraints
//! always pass, and so does any constraint whose attribute the item does not
//! carry: incomplete records are kept rather than silently dropped.

use crate::catalog::{CatalogItem, label_matches};

use super::criteria::{FilterCriteria, NO_PASS};

/// Half-width of the ski length window in cm
pub const LENGTH_TOLERANCE_CM: f64 = 8.0;

/// Whether a known pass list satisfies the selected pass type
#[must_use]
pub fn pass_list_matches(passes: &[String], wanted: &str) -> bool {
    if label_matches(NO_PASS, wanted) {
        passes.is_empty()
    } else {
        passes.iter().any(|p| label_matches(p, wanted))
    }
}

fn category_matches<I: CatalogItem + ?Sized>(item: &I, criteria: &FilterCriteria) -> bool {
    match (criteria.category, item.category()) {
        (Some(wanted), Some(actual)) => label_matches(wanted.label(), actual),
        _ => true,
    }
}

fn region_matches<I: CatalogItem + ?Sized>(item: &I, criteria: &FilterCriteria) -> bool {
    let Some(wanted) = criteria.region.as_deref() else {
        return true;
    };
    let labels = item.region_labels();
    labels.is_empty() || labels.iter().any(|l| label_matches(l, wanted))
}

fn pass_matches<I: CatalogItem + ?Sized>(item: &I, criteria: &FilterCriteria) -> bool {
    match (criteria.pass_type.as_deref(), item.pass_types()) {
        (Some(wanted), Some(passes)) => pass_list_matches(passes, wanted),
        _ => true,
    }
}

fn travel_matches<I: CatalogItem + ?Sized>(item: &I, criteria: &FilterCriteria) -> bool {
    match (criteria.max_travel_hours(), item.travel_hours()) {
        (Some(ceiling), Some(hours)) => hours <= ceiling,
        _ => true,
    }
}

fn budget_matches<I: CatalogItem + ?Sized>(item: &I, criteria: &FilterCriteria) -> bool {
    match (criteria.budget(), item.price()) {
        (Some(budget), Some(price)) => price <= budget,
        _ => true,
    }
}

fn length_matches<I: CatalogItem + ?Sized>(item: &I, criteria: &FilterCriteria) -> bool {
    match (criteria.target_length_cm(), item.length_cm()) {
        (Some(target), Some(length)) => (length - target).abs() <= LENGTH_TOLERANCE_CM,
        _ => true,
    }
}

fn terrain_matches<I: CatalogItem + ?Sized>(item: &I, criteria: &FilterCriteria) -> bool {
    if criteria.terrain.is_empty() {
        return true;
    }
    item.terrain_tags().is_none_or(|tags| {
        criteria
            .terrain
            .iter()
            .any(|t| tags.iter().any(|tag| label_matches(t.label(), tag)))
    })
}

fn ability_matches<I: CatalogItem + ?Sized>(item: &I, criteria: &FilterCriteria) -> bool {
    match (criteria.ability, item.skill_levels()) {
        (Some(ability), Some(levels)) => levels.iter().any(|l| label_matches(ability.label(), l)),
        _ => true,
    }
}

/// Whether `item` satisfies every active constraint in `criteria`
#[must_use]
pub fn matches<I: CatalogItem + ?Sized>(item: &I, criteria: &FilterCriteria) -> bool {
    category_matches(item, criteria)
        && region_matches(item, criteria)
        && pass_matches(item, criteria)
        && travel_matches(item, criteria)
        && budget_matches(item, criteria)
        && length_matches(item, criteria)
        && terrain_matches(item, criteria)
        && ability_matches(item, criteria)
}

/// Items satisfying `criteria`, in input order
#[must_use]
pub fn apply<'a, I: CatalogItem>(items: &'a [I], criteria: &FilterCriteria) -> Vec<&'a I> {
    items.iter().filter(|item| matches(*item, criteria)).collect()
}
