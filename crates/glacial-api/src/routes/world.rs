//! Routes for the World bounded context.

use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Json, Router};
use glacial_rules::domain::decay::weather_effect;
use glacial_world::application::query_handlers::{self, LocationView, WorldMapView};
use glacial_world::domain::locations::LocationId;
use glacial_world::domain::weather::WeatherType;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /map.
#[derive(Debug, Deserialize)]
pub struct MapQuery {
    /// The player's location; defaults to the starting location.
    pub current: Option<String>,
}

/// One row of the weather table.
#[derive(Debug, Serialize)]
pub struct WeatherEntry {
    /// Weather kind.
    #[serde(rename = "type")]
    pub kind: WeatherType,
    /// Flavor text.
    pub description: String,
    /// How the weather affects the player.
    pub effect: &'static str,
}

/// GET /locations
async fn list_locations() -> Json<Vec<LocationView>> {
    Json(query_handlers::list_locations())
}

/// GET /locations/{id}
async fn get_location(Path(id): Path<String>) -> Result<Json<LocationView>, ApiError> {
    Ok(Json(query_handlers::get_location(&id)?))
}

/// GET /map
async fn get_map(Query(query): Query<MapQuery>) -> Result<Json<WorldMapView>, ApiError> {
    let current = match query.current {
        Some(id) => id.parse::<LocationId>()?,
        None => LocationId::TundraEdge,
    };
    Ok(Json(query_handlers::get_world_map(current)))
}

/// GET /weather
async fn list_weather() -> Json<Vec<WeatherEntry>> {
    let table = query_handlers::list_weather_types()
        .into_iter()
        .map(|view| WeatherEntry {
            kind: view.kind,
            description: view.description,
            effect: weather_effect(view.kind),
        })
        .collect();
    Json(table)
}

/// Returns the router for the world context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/locations", get(list_locations))
        .route("/locations/{id}", get(get_location))
        .route("/map", get(get_map))
        .route("/weather", get(list_weather))
}
