//! Ranking of scored results

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogItem, Equipment};
use crate::error::PeakcisionError;

use super::scoring::ScoredItem;

/// Secondary ordering for items with equal fit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Equal fits keep their input order
    #[default]
    InputOrder,
    /// Equal fits are ordered by ascending id
    Id,
}

/// Sorts by fit, highest first. The sort is stable.
pub fn rank_by_fit<T: CatalogItem>(items: &mut [ScoredItem<T>], tie_break: TieBreak) {
    items.sort_by(|a, b| {
        let by_fit = b.fit.cmp(&a.fit);
        match tie_break {
            TieBreak::InputOrder => by_fit,
            TieBreak::Id => by_fit.then_with(|| a.item.id().cmp(b.item.id())),
        }
    });
}

/// Sort menu offered on the equipment finder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSort {
    #[default]
    BestMatch,
    PriceLowToHigh,
    Rating,
}

impl EquipmentSort {
    pub const ALL: [EquipmentSort; 3] = [
        EquipmentSort::BestMatch,
        EquipmentSort::PriceLowToHigh,
        EquipmentSort::Rating,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EquipmentSort::BestMatch => "Best match",
            EquipmentSort::PriceLowToHigh => "Price: Low to High",
            EquipmentSort::Rating => "Rating",
        }
    }

    fn keys(self) -> &'static [&'static str] {
        match self {
            EquipmentSort::BestMatch => &["best", "bestmatch", "match", "fit"],
            EquipmentSort::PriceLowToHigh => &["price", "pricelowtohigh", "cheapest"],
            EquipmentSort::Rating => &["rating", "rated", "toprated"],
        }
    }
}

impl fmt::Display for EquipmentSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EquipmentSort {
    type Err = PeakcisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|sort| sort.keys().contains(&key.as_str()))
            .ok_or_else(|| PeakcisionError::validation(format!("unknown sort order '{s}'")))
    }
}

fn by_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Orders equipment results for display. Every order is stable.
pub fn sort_equipment(items: &mut [ScoredItem<Equipment>], sort: EquipmentSort) {
    match sort {
        EquipmentSort::BestMatch => rank_by_fit(items, TieBreak::InputOrder),
        EquipmentSort::PriceLowToHigh => {
            items.sort_by(|a, b| by_price(a.item.price, b.item.price));
        }
        EquipmentSort::Rating => {
            items.sort_by(|a, b| {
                let a = a.item.rating.unwrap_or(0.0);
                let b = b.item.rating.unwrap_or(0.0);
                b.total_cmp(&a)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Resort, seed};
    use crate::finder::scoring::score_equipment;
    use rstest::rstest;

    fn scored(id: &str, fit: u8) -> ScoredItem<Resort> {
        ScoredItem {
            item: Resort {
                id: id.to_string(),
                name: id.to_uppercase(),
                ..Default::default()
            },
            fit,
        }
    }

    fn ids<T: CatalogItem>(items: &[ScoredItem<T>]) -> Vec<&str> {
        items.iter().map(|s| s.item.id()).collect()
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let mut items = vec![
            scored("d", 70),
            scored("a", 90),
            scored("c", 70),
            scored("b", 90),
            scored("e", 10),
        ];
        rank_by_fit(&mut items, TieBreak::InputOrder);
        assert_eq!(ids(&items), vec!["a", "b", "d", "c", "e"]);
        assert!(items.windows(2).all(|w| w[0].fit >= w[1].fit));
    }

    #[test]
    fn test_rank_with_id_tie_break() {
        let mut items = vec![scored("d", 70), scored("c", 70), scored("z", 95)];
        rank_by_fit(&mut items, TieBreak::Id);
        assert_eq!(ids(&items), vec!["z", "c", "d"]);
    }

    #[test]
    fn test_rank_all_equal_keeps_order() {
        let mut items: Vec<_> = ["m", "b", "x", "a"].iter().map(|id| scored(id, 50)).collect();
        rank_by_fit(&mut items, TieBreak::InputOrder);
        assert_eq!(ids(&items), vec!["m", "b", "x", "a"]);
    }

    #[rstest]
    #[case(EquipmentSort::BestMatch, vec!["enforcer-94", "qst-98", "hawx-110", "griffon-13"])]
    #[case(EquipmentSort::PriceLowToHigh, vec!["griffon-13", "hawx-110", "qst-98", "enforcer-94"])]
    #[case(EquipmentSort::Rating, vec!["enforcer-94", "qst-98", "hawx-110", "griffon-13"])]
    fn test_sort_equipment(#[case] sort: EquipmentSort, #[case] expected: Vec<&str>) {
        let mut items = score_equipment(seed::equipment());
        sort_equipment(&mut items, sort);
        assert_eq!(ids(&items), expected);
    }

    #[test]
    fn test_unknown_prices_sort_last() {
        let mut items = score_equipment(vec![
            Equipment {
                id: "mystery".to_string(),
                ..Default::default()
            },
            Equipment {
                id: "cheap".to_string(),
                price: Some(99.0),
                ..Default::default()
            },
        ]);
        sort_equipment(&mut items, EquipmentSort::PriceLowToHigh);
        assert_eq!(ids(&items), vec!["cheap", "mystery"]);
    }

    #[rstest]
    #[case("Best match", EquipmentSort::BestMatch)]
    #[case("price", EquipmentSort::PriceLowToHigh)]
    #[case("Price: Low to High", EquipmentSort::PriceLowToHigh)]
    #[case("RATING", EquipmentSort::Rating)]
    fn test_parse_sort(#[case] input: &str, #[case] expected: EquipmentSort) {
        assert_eq!(input.parse::<EquipmentSort>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_sort() {
        assert!("newest".parse::<EquipmentSort>().is_err());
    }
}
