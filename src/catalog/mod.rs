//! Catalog records, sources and the guarded loader

pub mod error;
pub mod loader;
pub mod models;
pub mod seed;
pub mod source;

pub use error::CatalogError;
pub use loader::{
    CatalogLoader, EQUIPMENT_LOAD_ERROR, FinderState, LoadOutcome, RESORTS_LOAD_ERROR,
    RequestSequence, RequestTicket,
};
pub use models::{
    Ability, CatalogItem, Equipment, EquipmentCategory, Flex, Resort, Terrain, TerrainMix,
    label_matches,
};
pub use source::{CatalogSource, EquipmentQuery, HttpCatalog, ResortQuery, StaticCatalog};
