use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::{
    catalog::{CatalogSource, Equipment, EquipmentQuery, Resort, ResortQuery},
    preferences::{PreferencesContext, UserPreferences},
    roi::{self, Recommendation, RoiInputs, RoiProjection},
};

/// Shared state of the HTTP service
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub preferences: PreferencesContext,
    /// Applied when a catalog request does not ask for a limit
    pub default_limit: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoiRequest {
    #[serde(default)]
    pub inputs: RoiInputs,
    #[serde(default)]
    pub sensitivity: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResponse {
    #[serde(flatten)]
    pub projection: RoiProjection,
    pub recommendation: Recommendation,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/resorts", get(get_resorts))
        .route("/equipment", get(get_equipment))
        .route("/roi", post(post_roi))
        .route(
            "/preferences",
            get(get_preferences)
                .put(put_preferences)
                .delete(reset_preferences),
        )
        .with_state(state)
}

async fn get_resorts(
    State(state): State<AppState>,
    Query(mut query): Query<ResortQuery>,
) -> Result<Json<Vec<Resort>>, StatusCode> {
    query.limit.get_or_insert(state.default_limit);
    let resorts = state.catalog.fetch_resorts(&query).await.map_err(|e| {
        error!("Resort catalog request failed: {}", e);
        StatusCode::BAD_GATEWAY
    })?;
    Ok(Json(resorts))
}

async fn get_equipment(
    State(state): State<AppState>,
    Query(mut query): Query<EquipmentQuery>,
) -> Result<Json<Vec<Equipment>>, StatusCode> {
    query.limit.get_or_insert(state.default_limit);
    let items = state.catalog.fetch_equipment(&query).await.map_err(|e| {
        error!("Equipment catalog request failed: {}", e);
        StatusCode::BAD_GATEWAY
    })?;
    Ok(Json(items))
}

async fn post_roi(Json(request): Json<RoiRequest>) -> Json<RoiResponse> {
    let projection = roi::project(&request.inputs, request.sensitivity);
    let recommendation = Recommendation::for_projection(&projection);
    Json(RoiResponse {
        projection,
        recommendation,
    })
}

async fn get_preferences(State(state): State<AppState>) -> Json<UserPreferences> {
    Json(state.preferences.get().await)
}

async fn put_preferences(
    State(state): State<AppState>,
    Json(patch): Json<Value>,
) -> Result<Json<UserPreferences>, StatusCode> {
    let merged = state.preferences.merge(&patch).await.map_err(|e| {
        warn!("Rejected preferences update: {}", e);
        StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(merged))
}

async fn reset_preferences(State(state): State<AppState>) -> Json<UserPreferences> {
    Json(state.preferences.reset().await)
}
