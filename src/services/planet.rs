//! Planet service
//!
//! Business logic for planet listing, lookup, and creation.

use std::sync::Arc;

use anyhow::Context;

use super::{store_violation, StoreViolation};
use crate::db::repositories::PlanetRepository;
use crate::models::{CreatePlanetInput, PlanetWithCounts};

/// Error types for planet service operations
#[derive(Debug, thiserror::Error)]
pub enum PlanetServiceError {
    /// No planet with the requested id
    #[error("Planet not found")]
    NotFound(i64),

    /// Unique constraint violation at the store
    #[error("{0}")]
    Conflict(String),

    /// NOT NULL / foreign key / check violation at the store
    #[error("{0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Planet service
pub struct PlanetService {
    repo: Arc<dyn PlanetRepository>,
}

impl PlanetService {
    pub fn new(repo: Arc<dyn PlanetRepository>) -> Self {
        Self { repo }
    }

    /// List all planets with their relation counts. Empty collection,
    /// never an error, when none exist.
    pub async fn list(&self) -> Result<Vec<PlanetWithCounts>, PlanetServiceError> {
        Ok(self.repo.list_with_counts().await?)
    }

    /// Get a planet by id with its relation counts
    pub async fn get(&self, id: i64) -> Result<PlanetWithCounts, PlanetServiceError> {
        self.repo
            .get_with_counts(id)
            .await?
            .ok_or(PlanetServiceError::NotFound(id))
    }

    /// Create a planet from a typed input.
    ///
    /// No field validation happens here; the store's column constraints are
    /// the validation boundary, and violations come back as typed errors.
    pub async fn create(
        &self,
        input: &CreatePlanetInput,
    ) -> Result<PlanetWithCounts, PlanetServiceError> {
        let planet = match self.repo.create(input).await {
            Ok(planet) => planet,
            Err(err) => {
                return Err(match store_violation(&err) {
                    Some(StoreViolation::Unique(msg)) => PlanetServiceError::Conflict(msg),
                    Some(StoreViolation::Constraint(msg)) => PlanetServiceError::InvalidInput(msg),
                    None => PlanetServiceError::Internal(err),
                })
            }
        };

        let created = self
            .repo
            .get_with_counts(planet.id)
            .await?
            .context("Planet missing after creation")?;

        Ok(created)
    }
}
