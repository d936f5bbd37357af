//! Character API endpoints
//!
//! Handles HTTP requests for character data:
//! - GET /characters - List all characters
//! - GET /characters/{id} - Get a single character
//! - POST /characters - Create a character

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::responses::CharacterResponse;
use crate::api::{ApiError, AppState};
use crate::models::CreateCharacterInput;

/// Build the characters router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_characters).post(create_character))
        .route("/{id}", get(get_character))
}

/// GET /characters - List all characters
async fn list_characters(
    State(state): State<AppState>,
) -> Result<Json<Vec<CharacterResponse>>, ApiError> {
    let characters = state.character_service.list().await?;

    Ok(Json(characters.into_iter().map(Into::into).collect()))
}

/// GET /characters/{id} - Get a single character
async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character = state.character_service.get(id).await?;

    Ok(Json(character.into()))
}

/// POST /characters - Create a character
async fn create_character(
    State(state): State<AppState>,
    Json(input): Json<CreateCharacterInput>,
) -> Result<(StatusCode, Json<CharacterResponse>), ApiError> {
    let character = state.character_service.create(&input).await?;

    Ok((StatusCode::CREATED, Json(character.into())))
}
