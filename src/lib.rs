//! `Peakcision` - ski resort discovery, gear matching and buy-vs-rent planning
//!
//! This library provides the decision engine behind the dashboard: catalog
//! loading, the filter/score/rank finder pipeline, the ROI planner and
//! persisted user preferences, plus an HTTP service exposing them.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod finder;
pub mod preferences;
pub mod roi;
pub mod telemetry;
pub mod views;
pub mod web;

// Re-export core types for public API
pub use catalog::{CatalogError, CatalogLoader, CatalogSource, Equipment, HttpCatalog, Resort, StaticCatalog};
pub use config::PeakcisionConfig;
pub use error::PeakcisionError;
pub use finder::{FilterCriteria, FinderScope, ScoredItem};
pub use preferences::{PreferencesContext, PreferencesStore, UserPreferences};
pub use roi::{Recommendation, RoiInputs, RoiProjection};
pub use views::View;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PeakcisionError>;
