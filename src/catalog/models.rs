//! Catalog record types and the shared item abstraction
//!
//! Records mirror the JSON served by the `/resorts` and `/equipment`
//! endpoints. Everything except the display name is optional so that
//! incomplete records still deserialize and flow through the filter stage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PeakcisionError;

/// Rider ability levels, ordered from least to most experienced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Terrain styles an item or resort is suited for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Groomers,
    #[serde(rename = "All-Mountain")]
    AllMountain,
    Powder,
    Park,
    Backcountry,
}

/// Equipment categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentCategory {
    Skis,
    Boots,
    Bindings,
}

impl Ability {
    pub const ALL: [Ability; 4] = [
        Ability::Beginner,
        Ability::Intermediate,
        Ability::Advanced,
        Ability::Expert,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Ability::Beginner => "Beginner",
            Ability::Intermediate => "Intermediate",
            Ability::Advanced => "Advanced",
            Ability::Expert => "Expert",
        }
    }
}

impl Terrain {
    pub const ALL: [Terrain; 5] = [
        Terrain::Groomers,
        Terrain::AllMountain,
        Terrain::Powder,
        Terrain::Park,
        Terrain::Backcountry,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Terrain::Groomers => "Groomers",
            Terrain::AllMountain => "All-Mountain",
            Terrain::Powder => "Powder",
            Terrain::Park => "Park",
            Terrain::Backcountry => "Backcountry",
        }
    }
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 3] = [
        EquipmentCategory::Skis,
        EquipmentCategory::Boots,
        EquipmentCategory::Bindings,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EquipmentCategory::Skis => "Skis",
            EquipmentCategory::Boots => "Boots",
            EquipmentCategory::Bindings => "Bindings",
        }
    }

    /// Whether the ski length window applies to this category
    #[must_use]
    pub fn is_length_sensitive(self) -> bool {
        matches!(self, EquipmentCategory::Skis)
    }
}

/// Case-insensitive comparison of a label against a free-form record value
#[must_use]
pub fn label_matches(label: &str, value: &str) -> bool {
    label.trim().eq_ignore_ascii_case(value.trim())
}

fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

macro_rules! label_enum_impls {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = PeakcisionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize_label(s);
                <$ty>::ALL
                    .into_iter()
                    .find(|v| normalize_label(v.label()) == wanted)
                    .ok_or_else(|| PeakcisionError::validation(format!("unknown {} '{s}'", $what)))
            }
        }
    };
}

label_enum_impls!(Ability, "ability level");
label_enum_impls!(Terrain, "terrain");
label_enum_impls!(EquipmentCategory, "equipment category");

/// Share of a resort's terrain per difficulty band, in percent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerrainMix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv: Option<f64>,
}

impl TerrainMix {
    /// Percentage of terrain suited to the given ability, if known
    #[must_use]
    pub fn share_for(&self, ability: Ability) -> Option<f64> {
        match ability {
            Ability::Beginner => self.beg,
            Ability::Intermediate => self.int,
            Ability::Advanced | Ability::Expert => self.adv,
        }
    }
}

/// A ski resort as served by the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resort {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, alias = "pass", skip_serializing_if = "Option::is_none")]
    pub pass_types: Option<Vec<String>>,
    /// Day ticket price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, rename = "travelHours", skip_serializing_if = "Option::is_none")]
    pub travel_hours: Option<f64>,
    /// Average season snowfall in inches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snowfall_avg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_top: Option<f64>,
    #[serde(default, rename = "terrainMix", skip_serializing_if = "Option::is_none")]
    pub terrain_mix: Option<TerrainMix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<Vec<String>>,
    /// Typical crowding, 0 (empty) to 1 (packed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, alias = "img", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Boot flex is numeric, ski flex is a label like "Medium"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flex {
    Index(u32),
    Label(String),
}

/// A piece of equipment as served by the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Ski length in cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex: Option<Flex>,
    /// Boot last width in mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub din: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<Vec<String>>,
    /// Review rating out of 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl Equipment {
    /// Parsed category, `None` when absent or not a known category
    #[must_use]
    pub fn category_kind(&self) -> Option<EquipmentCategory> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }
}

/// Attributes the filter and scoring stages read from a catalog record.
///
/// Every accessor returns `None` (or an empty list) when the record does not
/// carry the attribute; the filter stage treats that as a match.
pub trait CatalogItem {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    fn category(&self) -> Option<&str> {
        None
    }

    /// Region-like labels (region, state) the record can be matched on
    fn region_labels(&self) -> Vec<&str> {
        Vec::new()
    }

    fn pass_types(&self) -> Option<&[String]> {
        None
    }

    fn travel_hours(&self) -> Option<f64> {
        None
    }

    fn price(&self) -> Option<f64> {
        None
    }

    /// Length in cm, only meaningful for length-sensitive categories
    fn length_cm(&self) -> Option<f64> {
        None
    }

    fn terrain_tags(&self) -> Option<&[String]> {
        None
    }

    fn skill_levels(&self) -> Option<&[String]> {
        None
    }
}

impl CatalogItem for Resort {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn region_labels(&self) -> Vec<&str> {
        [self.region.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }

    fn pass_types(&self) -> Option<&[String]> {
        self.pass_types.as_deref()
    }

    fn travel_hours(&self) -> Option<f64> {
        self.travel_hours
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn terrain_tags(&self) -> Option<&[String]> {
        self.terrain.as_deref()
    }
}

impl CatalogItem for Equipment {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn length_cm(&self) -> Option<f64> {
        let applies = self
            .category_kind()
            .is_none_or(EquipmentCategory::is_length_sensitive);
        if applies { self.length } else { None }
    }

    fn terrain_tags(&self) -> Option<&[String]> {
        self.terrain.as_deref()
    }

    fn skill_levels(&self) -> Option<&[String]> {
        self.skill.as_deref()
    }
}
