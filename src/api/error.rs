//! API error responses
//!
//! Every failure leaves the API as a `{"message": <text>}` JSON body paired
//! with a status code. Service-layer errors convert via `From`, so handlers
//! can use `?` throughout.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::{
    BlogPostServiceError, CharacterServiceError, FavoriteServiceError, PlanetServiceError,
    UserServiceError,
};

/// Uniform error envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Error response for API errors
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

fn internal(err: anyhow::Error) -> ApiError {
    tracing::error!("Internal error: {err:#}");
    ApiError::internal_error("Internal server error")
}

impl From<CharacterServiceError> for ApiError {
    fn from(err: CharacterServiceError) -> Self {
        match err {
            CharacterServiceError::NotFound(id) => {
                tracing::debug!(character_id = id, "character not found");
                ApiError::not_found(err.to_string())
            }
            CharacterServiceError::HomeworldNotFound(id) => {
                tracing::debug!(planet_id = id, "homeworld not found");
                ApiError::not_found(err.to_string())
            }
            CharacterServiceError::Conflict(_) => ApiError::conflict(err.to_string()),
            CharacterServiceError::InvalidInput(_) => ApiError::bad_request(err.to_string()),
            CharacterServiceError::Internal(e) => internal(e),
        }
    }
}

impl From<PlanetServiceError> for ApiError {
    fn from(err: PlanetServiceError) -> Self {
        match err {
            PlanetServiceError::NotFound(id) => {
                tracing::debug!(planet_id = id, "planet not found");
                ApiError::not_found(err.to_string())
            }
            PlanetServiceError::Conflict(_) => ApiError::conflict(err.to_string()),
            PlanetServiceError::InvalidInput(_) => ApiError::bad_request(err.to_string()),
            PlanetServiceError::Internal(e) => internal(e),
        }
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::NotFound(id) => {
                tracing::debug!(user_id = id, "user not found");
                ApiError::not_found(err.to_string())
            }
            UserServiceError::Conflict(_) => ApiError::conflict(err.to_string()),
            UserServiceError::Internal(e) => internal(e),
        }
    }
}

impl From<FavoriteServiceError> for ApiError {
    fn from(err: FavoriteServiceError) -> Self {
        match err {
            FavoriteServiceError::UserNotFound(id) => {
                tracing::debug!(user_id = id, "user not found");
                ApiError::not_found(err.to_string())
            }
            FavoriteServiceError::CharacterNotFound(id) => {
                tracing::debug!(character_id = id, "character not found");
                ApiError::not_found(err.to_string())
            }
            FavoriteServiceError::PlanetNotFound(id) => {
                tracing::debug!(planet_id = id, "planet not found");
                ApiError::not_found(err.to_string())
            }
            FavoriteServiceError::CharacterNotFavorited
            | FavoriteServiceError::PlanetNotFavorited => ApiError::not_found(err.to_string()),
            FavoriteServiceError::Internal(e) => internal(e),
        }
    }
}

// Blog posts have no routes, but the service is part of the library
// surface; keep the translation alongside the others.
impl From<BlogPostServiceError> for ApiError {
    fn from(err: BlogPostServiceError) -> Self {
        match err {
            BlogPostServiceError::NotFound(id) => {
                tracing::debug!(post_id = id, "blog post not found");
                ApiError::not_found(err.to_string())
            }
            BlogPostServiceError::AuthorNotFound(id) => {
                tracing::debug!(user_id = id, "author not found");
                ApiError::not_found(err.to_string())
            }
            BlogPostServiceError::CharacterNotFound(id) => {
                tracing::debug!(character_id = id, "featured character not found");
                ApiError::not_found(err.to_string())
            }
            BlogPostServiceError::PlanetNotFound(id) => {
                tracing::debug!(planet_id = id, "featured planet not found");
                ApiError::not_found(err.to_string())
            }
            BlogPostServiceError::InvalidInput(_) => ApiError::bad_request(err.to_string()),
            BlogPostServiceError::Internal(e) => internal(e),
        }
    }
}
