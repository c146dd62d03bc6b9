//! Catalog data sources
//!
//! A [`CatalogSource`] answers the two catalog queries of the HTTP contract:
//! `GET /resorts?q=&region=&pass=&limit=` and
//! `GET /equipment?q=&category=&terrain=&skill=&limit=`.
//! [`HttpCatalog`] talks to a remote server, [`StaticCatalog`] answers from
//! an in-memory list (the built-in seed data by default) and also backs the
//! `serve` command.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::error::{CatalogError, Result};
use super::models::{CatalogItem, Equipment, Resort, label_matches};
use super::seed;
use crate::finder::{ANY, FilterCriteria, pass_list_matches};

/// Query parameters for the resort endpoint. Absent values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResortQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Query parameters for the equipment endpoint. Absent values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Comma separated terrain labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Drops empty values and the "Any" sentinel
fn active(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !label_matches(ANY, v))
}

impl ResortQuery {
    /// Builds the fetch parameters for the current criteria
    #[must_use]
    pub fn from_criteria(criteria: &FilterCriteria, limit: usize) -> Self {
        Self {
            q: active(Some(criteria.query.as_str())).map(str::to_string),
            region: criteria.region.clone(),
            pass: criteria.pass_type.clone(),
            limit: Some(limit),
        }
    }
}

impl EquipmentQuery {
    /// Builds the fetch parameters for the current criteria
    #[must_use]
    pub fn from_criteria(criteria: &FilterCriteria, limit: usize) -> Self {
        let terrain = (!criteria.terrain.is_empty()).then(|| {
            criteria
                .terrain
                .iter()
                .map(|t| t.label())
                .collect::<Vec<_>>()
                .join(",")
        });
        Self {
            q: active(Some(criteria.query.as_str())).map(str::to_string),
            category: criteria.category.map(|c| c.label().to_string()),
            terrain,
            skill: criteria.ability.map(|a| a.label().to_string()),
            limit: Some(limit),
        }
    }
}

/// Anything that can answer catalog queries
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_resorts(&self, query: &ResortQuery) -> Result<Vec<Resort>>;
    async fn fetch_equipment(&self, query: &EquipmentQuery) -> Result<Vec<Equipment>>;
}

/// HTTP JSON catalog client
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a new client for the catalog rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("Peakcision/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Catalog request: GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::Network(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Catalog request to {} failed with {}", url, status);
            return Err(CatalogError::Status(status.as_u16()));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| CatalogError::Parse(format!("invalid catalog payload from {url}: {e}")))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    #[instrument(name = "fetch_resorts", level = "debug", skip(self))]
    async fn fetch_resorts(&self, query: &ResortQuery) -> Result<Vec<Resort>> {
        let resorts: Vec<Resort> = self.get_json("/resorts", query).await?;
        info!("Fetched {} resorts", resorts.len());
        Ok(resorts)
    }

    #[instrument(name = "fetch_equipment", level = "debug", skip(self))]
    async fn fetch_equipment(&self, query: &EquipmentQuery) -> Result<Vec<Equipment>> {
        let items: Vec<Equipment> = self.get_json("/equipment", query).await?;
        info!("Fetched {} equipment items", items.len());
        Ok(items)
    }
}

/// In-memory catalog with server-side query semantics
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    resorts: Vec<Resort>,
    equipment: Vec<Equipment>,
}

fn text_matches<I: CatalogItem>(item: &I, q: &str) -> bool {
    let q = q.to_lowercase();
    item.name().to_lowercase().contains(&q)
        || item
            .region_labels()
            .iter()
            .any(|r| r.to_lowercase().contains(&q))
}

fn tags_contain(tags: Option<&[String]>, wanted: &str) -> bool {
    tags.is_some_and(|tags| tags.iter().any(|t| label_matches(t, wanted)))
}

impl StaticCatalog {
    #[must_use]
    pub fn new(resorts: Vec<Resort>, equipment: Vec<Equipment>) -> Self {
        Self { resorts, equipment }
    }

    /// Catalog backed by the built-in seed data
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed::resorts(), seed::equipment())
    }

    #[must_use]
    pub fn search_resorts(&self, query: &ResortQuery) -> Vec<Resort> {
        let q = active(query.q.as_deref());
        let region = active(query.region.as_deref());
        let pass = active(query.pass.as_deref());

        self.resorts
            .iter()
            .filter(|r| q.is_none_or(|q| text_matches(*r, q)))
            .filter(|r| {
                region.is_none_or(|region| {
                    r.region_labels().iter().any(|l| label_matches(l, region))
                })
            })
            .filter(|r| {
                pass.is_none_or(|pass| {
                    r.pass_types
                        .as_deref()
                        .is_some_and(|passes| pass_list_matches(passes, pass))
                })
            })
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn search_equipment(&self, query: &EquipmentQuery) -> Vec<Equipment> {
        let q = active(query.q.as_deref());
        let category = active(query.category.as_deref());
        let skill = active(query.skill.as_deref());
        let terrains: Vec<&str> = active(query.terrain.as_deref())
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        self.equipment
            .iter()
            .filter(|e| q.is_none_or(|q| text_matches(*e, q)))
            .filter(|e| {
                category.is_none_or(|c| e.category.as_deref().is_some_and(|ec| label_matches(ec, c)))
            })
            .filter(|e| {
                terrains.is_empty()
                    || terrains
                        .iter()
                        .any(|t| tags_contain(e.terrain.as_deref(), t))
            })
            .filter(|e| skill.is_none_or(|s| tags_contain(e.skill.as_deref(), s)))
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_resorts(&self, query: &ResortQuery) -> Result<Vec<Resort>> {
        Ok(self.search_resorts(query))
    }

    async fn fetch_equipment(&self, query: &EquipmentQuery) -> Result<Vec<Equipment>> {
        Ok(self.search_equipment(query))
    }
}
