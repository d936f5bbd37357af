//! Planet API endpoints
//!
//! Handles HTTP requests for planet data:
//! - GET /planets - List all planets
//! - GET /planets/{id} - Get a single planet
//! - POST /planets - Create a planet

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::responses::PlanetResponse;
use crate::api::{ApiError, AppState};
use crate::models::CreatePlanetInput;

/// Build the planets router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_planets).post(create_planet))
        .route("/{id}", get(get_planet))
}

/// GET /planets - List all planets
async fn list_planets(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlanetResponse>>, ApiError> {
    let planets = state.planet_service.list().await?;

    Ok(Json(planets.into_iter().map(Into::into).collect()))
}

/// GET /planets/{id} - Get a single planet
async fn get_planet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PlanetResponse>, ApiError> {
    let planet = state.planet_service.get(id).await?;

    Ok(Json(planet.into()))
}

/// POST /planets - Create a planet
async fn create_planet(
    State(state): State<AppState>,
    Json(input): Json<CreatePlanetInput>,
) -> Result<(StatusCode, Json<PlanetResponse>), ApiError> {
    let planet = state.planet_service.create(&input).await?;

    Ok((StatusCode::CREATED, Json(planet.into())))
}
