//! User API endpoints
//!
//! Handles HTTP requests for users and their favorites:
//! - GET /users - List all users
//! - GET /users/{id} - Get a single user
//! - GET /users/{id}/favorites - Both favorites collections
//! - POST/DELETE /users/{id}/favorites/characters/{character_id}
//! - POST/DELETE /users/{id}/favorites/planets/{planet_id}
//!
//! There is no user creation endpoint; accounts are provisioned through
//! `UserService::create` directly.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::responses::{FavoritesResponse, MessageResponse, UserResponse};
use crate::api::{ApiError, AppState};
use crate::services::FavoriteOutcome;

/// Build the users router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_user))
        .route("/{id}/favorites", get(get_favorites))
        .route(
            "/{id}/favorites/characters/{character_id}",
            axum::routing::post(add_favorite_character).delete(remove_favorite_character),
        )
        .route(
            "/{id}/favorites/planets/{planet_id}",
            axum::routing::post(add_favorite_planet).delete(remove_favorite_planet),
        )
}

/// GET /users - List all users
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list().await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// GET /users/{id} - Get a single user
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get(id).await?;

    Ok(Json(user.into()))
}

/// GET /users/{id}/favorites - Both favorites collections, fully serialized
async fn get_favorites(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let favorites = state.favorite_service.list_for_user(id).await?;

    Ok(Json(favorites.into()))
}

fn favorite_message(outcome: FavoriteOutcome, kind: &str) -> MessageResponse {
    match outcome {
        FavoriteOutcome::Added => MessageResponse::new(format!("{} added to favorites", kind)),
        FavoriteOutcome::AlreadyFavorite => {
            MessageResponse::new(format!("{} already in favorites", kind))
        }
    }
}

/// POST /users/{id}/favorites/characters/{character_id}
async fn add_favorite_character(
    State(state): State<AppState>,
    Path((id, character_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let outcome = state
        .favorite_service
        .add_character(id, character_id)
        .await?;

    Ok(Json(favorite_message(outcome, "Character")))
}

/// DELETE /users/{id}/favorites/characters/{character_id}
async fn remove_favorite_character(
    State(state): State<AppState>,
    Path((id, character_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .favorite_service
        .remove_character(id, character_id)
        .await?;

    Ok(Json(MessageResponse::new(
        "Character removed from favorites",
    )))
}

/// POST /users/{id}/favorites/planets/{planet_id}
async fn add_favorite_planet(
    State(state): State<AppState>,
    Path((id, planet_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let outcome = state.favorite_service.add_planet(id, planet_id).await?;

    Ok(Json(favorite_message(outcome, "Planet")))
}

/// DELETE /users/{id}/favorites/planets/{planet_id}
async fn remove_favorite_planet(
    State(state): State<AppState>,
    Path((id, planet_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.favorite_service.remove_planet(id, planet_id).await?;

    Ok(Json(MessageResponse::new("Planet removed from favorites")))
}
