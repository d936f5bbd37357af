//! Character service
//!
//! Business logic for character listing, lookup, and creation. A creation
//! that names a homeworld verifies the planet exists before inserting, so
//! the referential check surfaces as a typed NotFound rather than a
//! foreign-key fault.

use std::sync::Arc;

use anyhow::Context;

use super::{store_violation, StoreViolation};
use crate::db::repositories::{CharacterRepository, PlanetRepository};
use crate::models::{CharacterWithRelations, CreateCharacterInput};

/// Error types for character service operations
#[derive(Debug, thiserror::Error)]
pub enum CharacterServiceError {
    /// No character with the requested id
    #[error("Character not found")]
    NotFound(i64),

    /// homeworld_id doesn't reference an existing planet
    #[error("Planet not found")]
    HomeworldNotFound(i64),

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

/// Character service
pub struct CharacterService {
    characters: Arc<dyn CharacterRepository>,
    planets: Arc<dyn PlanetRepository>,
}

impl CharacterService {
    pub fn new(characters: Arc<dyn CharacterRepository>, planets: Arc<dyn PlanetRepository>) -> Self {
        Self { characters, planets }
    }

    /// List all characters with homeworld and favorite count loaded
    pub async fn list(&self) -> Result<Vec<CharacterWithRelations>, CharacterServiceError> {
        Ok(self.characters.list_with_relations().await?)
    }

    /// Get a character by id with homeworld and favorite count loaded
    pub async fn get(&self, id: i64) -> Result<CharacterWithRelations, CharacterServiceError> {
        self.characters
            .get_with_relations(id)
            .await?
            .ok_or(CharacterServiceError::NotFound(id))
    }

    /// Create a character from a typed input.
    pub async fn create(
        &self,
        input: &CreateCharacterInput,
    ) -> Result<CharacterWithRelations, CharacterServiceError> {
        if let Some(homeworld_id) = input.homeworld_id {
            self.planets
                .get_by_id(homeworld_id)
                .await?
                .ok_or(CharacterServiceError::HomeworldNotFound(homeworld_id))?;
        }

        let character = match self.characters.create(input).await {
            Ok(character) => character,
            Err(err) => {
                return Err(match store_violation(&err) {
                    Some(StoreViolation::Unique(msg)) => CharacterServiceError::Conflict(msg),
                    Some(StoreViolation::Constraint(msg)) => {
                        CharacterServiceError::InvalidInput(msg)
                    }
                    None => CharacterServiceError::Internal(err),
                })
            }
        };

        let created = self
            .characters
            .get_with_relations(character.id)
            .await?
            .context("Character missing after creation")?;

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxCharacterRepository, SqlxPlanetRepository};
    use crate::db::{create_test_pool, migrations, DbPool};
    use crate::models::CreatePlanetInput;
    use crate::services::planet::PlanetService;

    async fn setup() -> (DbPool, CharacterService, PlanetService) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let planet_repo = SqlxPlanetRepository::boxed(pool.clone());
        let character_service = CharacterService::new(
            SqlxCharacterRepository::boxed(pool.clone()),
            planet_repo.clone(),
        );
        let planet_service = PlanetService::new(planet_repo);

        (pool, character_service, planet_service)
    }

    fn luke_input(homeworld_id: Option<i64>) -> CreateCharacterInput {
        CreateCharacterInput {
            name: Some("Luke Skywalker".to_string()),
            birth_year: Some("19BBY".to_string()),
            gender: Some("male".to_string()),
            homeworld_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_without_homeworld() {
        let (_pool, characters, _planets) = setup().await;

        let created = characters
            .create(&luke_input(None))
            .await
            .expect("Create failed");

        assert_eq!(created.character.name, "Luke Skywalker");
        assert!(created.homeworld.is_none());
        assert_eq!(created.favorited_by_count, 0);
    }

    #[tokio::test]
    async fn test_create_embeds_homeworld_like_standalone_planet() {
        let (_pool, characters, planets) = setup().await;

        let tatooine = planets
            .create(&CreatePlanetInput {
                name: Some("Tatooine".to_string()),
                climate: Some("arid".to_string()),
                ..Default::default()
            })
            .await
            .expect("Planet create failed");

        let created = characters
            .create(&luke_input(Some(tatooine.planet.id)))
            .await
            .expect("Character create failed");

        let homeworld = created.homeworld.expect("Homeworld should be embedded");
        assert_eq!(homeworld.planet.id, tatooine.planet.id);
        assert_eq!(homeworld.planet.name, "Tatooine");
        assert_eq!(homeworld.planet.climate.as_deref(), Some("arid"));
        // The embedded planet now has one resident, exactly like its own
        // standalone view.
        assert_eq!(homeworld.residents_count, 1);
        let standalone = planets.get(tatooine.planet.id).await.expect("Get failed");
        assert_eq!(standalone.residents_count, homeworld.residents_count);
        assert_eq!(standalone.favorited_by_count, homeworld.favorited_by_count);
    }

    #[tokio::test]
    async fn test_create_with_dangling_homeworld_fails() {
        let (_pool, characters, _planets) = setup().await;

        let result = characters.create(&luke_input(Some(12345))).await;
        assert!(matches!(
            result,
            Err(CharacterServiceError::HomeworldNotFound(12345))
        ));
    }

    #[tokio::test]
    async fn test_get_missing_character_is_not_found() {
        let (_pool, characters, _planets) = setup().await;

        let result = characters.get(999_999).await;
        assert!(matches!(
            result,
            Err(CharacterServiceError::NotFound(999_999))
        ));
    }

    #[tokio::test]
    async fn test_create_without_name_is_invalid_input() {
        let (_pool, characters, _planets) = setup().await;

        let result = characters.create(&CreateCharacterInput::default()).await;
        assert!(matches!(
            result,
            Err(CharacterServiceError::InvalidInput(_))
        ));
    }
}
