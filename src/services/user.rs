//! User service
//!
//! Business logic for user listing and lookup. Creation exists for seeding
//! and tests; there is no create endpoint on the HTTP surface.

use std::sync::Arc;

use super::{store_violation, StoreViolation};
use crate::db::repositories::UserRepository;
use crate::models::{NewUser, User, UserWithCounts};

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// No user with the requested id
    #[error("User not found")]
    NotFound(i64),

    /// Duplicate unique field (email or username)
    #[error("{0}")]
    Conflict(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// User service
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// List all users with their relation counts
    pub async fn list(&self) -> Result<Vec<UserWithCounts>, UserServiceError> {
        Ok(self.repo.list_with_counts().await?)
    }

    /// Get a user by id with their relation counts
    pub async fn get(&self, id: i64) -> Result<UserWithCounts, UserServiceError> {
        self.repo
            .get_with_counts(id)
            .await?
            .ok_or(UserServiceError::NotFound(id))
    }

    /// Create a user. A duplicate email or username comes back as Conflict.
    pub async fn create(&self, input: &NewUser) -> Result<User, UserServiceError> {
        match self.repo.create(input).await {
            Ok(user) => Ok(user),
            Err(err) => Err(match store_violation(&err) {
                Some(StoreViolation::Unique(msg)) => UserServiceError::Conflict(msg),
                _ => UserServiceError::Internal(err),
            }),
        }
    }
}
