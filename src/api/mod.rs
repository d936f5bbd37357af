//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the Starblog system:
//! - Character endpoints
//! - Planet endpoints
//! - User and favorites endpoints
//! - API index at the root path

pub mod characters;
pub mod error;
pub mod planets;
pub mod responses;
pub mod users;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::repositories::{
    SqlxBlogPostRepository, SqlxCharacterRepository, SqlxFavoriteRepository, SqlxPlanetRepository,
    SqlxUserRepository,
};
use crate::db::DbPool;
use crate::services::{
    BlogPostService, CharacterService, FavoriteService, PlanetService, UserService,
};

pub use error::ApiError;

/// Shared application state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub character_service: Arc<CharacterService>,
    pub planet_service: Arc<PlanetService>,
    pub user_service: Arc<UserService>,
    pub favorite_service: Arc<FavoriteService>,
    pub blog_post_service: Arc<BlogPostService>,
}

impl AppState {
    /// Wire repositories and services on top of a database pool.
    pub fn from_pool(pool: DbPool) -> Self {
        let users = SqlxUserRepository::boxed(pool.clone());
        let characters = SqlxCharacterRepository::boxed(pool.clone());
        let planets = SqlxPlanetRepository::boxed(pool.clone());
        let favorites = SqlxFavoriteRepository::boxed(pool.clone());
        let posts = SqlxBlogPostRepository::boxed(pool);

        Self {
            character_service: Arc::new(CharacterService::new(
                characters.clone(),
                planets.clone(),
            )),
            planet_service: Arc::new(PlanetService::new(planets.clone())),
            user_service: Arc::new(UserService::new(users.clone())),
            favorite_service: Arc::new(FavoriteService::new(
                users.clone(),
                characters.clone(),
                planets.clone(),
                favorites,
            )),
            blog_post_service: Arc::new(BlogPostService::new(posts, users, characters, planets)),
        }
    }
}

/// GET / - List the available endpoints
async fn api_index() -> Json<Value> {
    Json(json!({
        "endpoints": [
            "GET /characters",
            "GET /characters/{id}",
            "POST /characters",
            "GET /planets",
            "GET /planets/{id}",
            "POST /planets",
            "GET /users",
            "GET /users/{id}",
            "GET /users/{id}/favorites",
            "POST /users/{id}/favorites/characters/{character_id}",
            "DELETE /users/{id}/favorites/characters/{character_id}",
            "POST /users/{id}/favorites/planets/{planet_id}",
            "DELETE /users/{id}/favorites/planets/{planet_id}",
        ]
    }))
}

/// Build the main API router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_index))
        .nest("/characters", characters::router())
        .nest("/planets", planets::router())
        .nest("/users", users::router())
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(build_api_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
