//! Favorites service
//!
//! Manages the two favorites association sets for a user. The contract is
//! deliberately asymmetric and preserved exactly as shipped: adding a pair
//! that already exists is an idempotent success ("already in favorites",
//! 200), while removing a pair that was never added is an error ("not in
//! favorites", 404).

use std::sync::Arc;

use crate::db::repositories::{
    CharacterRepository, FavoriteRepository, PlanetRepository, UserRepository,
};
use crate::models::{CharacterWithRelations, PlanetWithCounts};

/// Error types for favorites operations
#[derive(Debug, thiserror::Error)]
pub enum FavoriteServiceError {
    #[error("User not found")]
    UserNotFound(i64),

    #[error("Character not found")]
    CharacterNotFound(i64),

    #[error("Planet not found")]
    PlanetNotFound(i64),

    /// Removal of a pair that is not in the association set
    #[error("Character not in favorites")]
    CharacterNotFavorited,

    /// Removal of a pair that is not in the association set
    #[error("Planet not in favorites")]
    PlanetNotFavorited,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result of an add operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    /// A new pair was inserted
    Added,
    /// The pair was already in the set; nothing changed
    AlreadyFavorite,
}

/// A user's favorites, fully loaded
#[derive(Debug, Clone)]
pub struct UserFavorites {
    pub characters: Vec<CharacterWithRelations>,
    pub planets: Vec<PlanetWithCounts>,
}

/// Favorites service
pub struct FavoriteService {
    users: Arc<dyn UserRepository>,
    characters: Arc<dyn CharacterRepository>,
    planets: Arc<dyn PlanetRepository>,
    favorites: Arc<dyn FavoriteRepository>,
}

impl FavoriteService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        characters: Arc<dyn CharacterRepository>,
        planets: Arc<dyn PlanetRepository>,
        favorites: Arc<dyn FavoriteRepository>,
    ) -> Self {
        Self {
            users,
            characters,
            planets,
            favorites,
        }
    }

    async fn check_user(&self, user_id: i64) -> Result<(), FavoriteServiceError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(FavoriteServiceError::UserNotFound(user_id))?;
        Ok(())
    }

    async fn check_character(&self, character_id: i64) -> Result<(), FavoriteServiceError> {
        self.characters
            .get_by_id(character_id)
            .await?
            .ok_or(FavoriteServiceError::CharacterNotFound(character_id))?;
        Ok(())
    }

    async fn check_planet(&self, planet_id: i64) -> Result<(), FavoriteServiceError> {
        self.planets
            .get_by_id(planet_id)
            .await?
            .ok_or(FavoriteServiceError::PlanetNotFound(planet_id))?;
        Ok(())
    }

    /// Both favorites collections for a user, fully serialized objects.
    pub async fn list_for_user(&self, user_id: i64) -> Result<UserFavorites, FavoriteServiceError> {
        self.check_user(user_id).await?;

        let characters = self.favorites.characters_for_user(user_id).await?;
        let planets = self.favorites.planets_for_user(user_id).await?;

        Ok(UserFavorites {
            characters,
            planets,
        })
    }

    /// Add a character to a user's favorites (idempotent).
    pub async fn add_character(
        &self,
        user_id: i64,
        character_id: i64,
    ) -> Result<FavoriteOutcome, FavoriteServiceError> {
        self.check_user(user_id).await?;
        self.check_character(character_id).await?;

        if self.favorites.add_character(user_id, character_id).await? {
            Ok(FavoriteOutcome::Added)
        } else {
            Ok(FavoriteOutcome::AlreadyFavorite)
        }
    }

    /// Remove a character from a user's favorites. Removal of an absent
    /// pair is an error, unlike the idempotent add.
    pub async fn remove_character(
        &self,
        user_id: i64,
        character_id: i64,
    ) -> Result<(), FavoriteServiceError> {
        self.check_user(user_id).await?;
        self.check_character(character_id).await?;

        if self.favorites.remove_character(user_id, character_id).await? {
            Ok(())
        } else {
            Err(FavoriteServiceError::CharacterNotFavorited)
        }
    }

    /// Add a planet to a user's favorites (idempotent).
    pub async fn add_planet(
        &self,
        user_id: i64,
        planet_id: i64,
    ) -> Result<FavoriteOutcome, FavoriteServiceError> {
        self.check_user(user_id).await?;
        self.check_planet(planet_id).await?;

        if self.favorites.add_planet(user_id, planet_id).await? {
            Ok(FavoriteOutcome::Added)
        } else {
            Ok(FavoriteOutcome::AlreadyFavorite)
        }
    }

    /// Remove a planet from a user's favorites.
    pub async fn remove_planet(
        &self,
        user_id: i64,
        planet_id: i64,
    ) -> Result<(), FavoriteServiceError> {
        self.check_user(user_id).await?;
        self.check_planet(planet_id).await?;

        if self.favorites.remove_planet(user_id, planet_id).await? {
            Ok(())
        } else {
            Err(FavoriteServiceError::PlanetNotFavorited)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        SqlxCharacterRepository, SqlxFavoriteRepository, SqlxPlanetRepository, SqlxUserRepository,
    };
    use crate::db::{create_test_pool, migrations, DbPool};
    use crate::models::{CreateCharacterInput, CreatePlanetInput, NewUser};

    struct Fixture {
        service: FavoriteService,
        user_id: i64,
        character_id: i64,
        planet_id: i64,
    }

    async fn setup() -> (DbPool, Fixture) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let users = SqlxUserRepository::boxed(pool.clone());
        let characters = SqlxCharacterRepository::boxed(pool.clone());
        let planets = SqlxPlanetRepository::boxed(pool.clone());
        let favorites = SqlxFavoriteRepository::boxed(pool.clone());

        let user = users
            .create(&NewUser {
                email: "han@falcon.sw".to_string(),
                password: "kessel".to_string(),
                username: "han".to_string(),
                first_name: None,
                last_name: None,
            })
            .await
            .expect("User create failed");

        let planet = planets
            .create(&CreatePlanetInput {
                name: Some("Corellia".to_string()),
                ..Default::default()
            })
            .await
            .expect("Planet create failed");

        let character = characters
            .create(&CreateCharacterInput {
                name: Some("Chewbacca".to_string()),
                homeworld_id: None,
                ..Default::default()
            })
            .await
            .expect("Character create failed");

        let fixture = Fixture {
            service: FavoriteService::new(users, characters, planets, favorites),
            user_id: user.id,
            character_id: character.id,
            planet_id: planet.id,
        };

        (pool, fixture)
    }

    #[tokio::test]
    async fn test_add_character_is_idempotent() {
        let (_pool, f) = setup().await;

        let first = f
            .service
            .add_character(f.user_id, f.character_id)
            .await
            .expect("First add failed");
        assert_eq!(first, FavoriteOutcome::Added);

        let second = f
            .service
            .add_character(f.user_id, f.character_id)
            .await
            .expect("Second add failed");
        assert_eq!(second, FavoriteOutcome::AlreadyFavorite);

        // Exactly one row in the association set
        let favorites = f
            .service
            .list_for_user(f.user_id)
            .await
            .expect("List failed");
        assert_eq!(favorites.characters.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_is_asymmetric_with_add() {
        let (_pool, f) = setup().await;

        // Removing a never-added pair is an error
        let missing = f.service.remove_character(f.user_id, f.character_id).await;
        assert!(matches!(
            missing,
            Err(FavoriteServiceError::CharacterNotFavorited)
        ));

        f.service
            .add_character(f.user_id, f.character_id)
            .await
            .expect("Add failed");

        f.service
            .remove_character(f.user_id, f.character_id)
            .await
            .expect("Remove failed");

        // A second removal of the same pair fails again
        let again = f.service.remove_character(f.user_id, f.character_id).await;
        assert!(matches!(
            again,
            Err(FavoriteServiceError::CharacterNotFavorited)
        ));
    }

    #[tokio::test]
    async fn test_planet_favorites_round_trip() {
        let (_pool, f) = setup().await;

        let added = f
            .service
            .add_planet(f.user_id, f.planet_id)
            .await
            .expect("Add failed");
        assert_eq!(added, FavoriteOutcome::Added);

        let favorites = f
            .service
            .list_for_user(f.user_id)
            .await
            .expect("List failed");
        assert_eq!(favorites.planets.len(), 1);
        assert_eq!(favorites.planets[0].planet.name, "Corellia");
        assert_eq!(favorites.planets[0].favorited_by_count, 1);

        f.service
            .remove_planet(f.user_id, f.planet_id)
            .await
            .expect("Remove failed");

        let after = f
            .service
            .list_for_user(f.user_id)
            .await
            .expect("List failed");
        assert!(after.planets.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (_pool, f) = setup().await;

        let result = f.service.add_character(9999, f.character_id).await;
        assert!(matches!(
            result,
            Err(FavoriteServiceError::UserNotFound(9999))
        ));

        let listing = f.service.list_for_user(9999).await;
        assert!(matches!(
            listing,
            Err(FavoriteServiceError::UserNotFound(9999))
        ));
    }

    #[tokio::test]
    async fn test_unknown_target_is_not_found() {
        let (_pool, f) = setup().await;

        let character = f.service.add_character(f.user_id, 9999).await;
        assert!(matches!(
            character,
            Err(FavoriteServiceError::CharacterNotFound(9999))
        ));

        let planet = f.service.remove_planet(f.user_id, 9999).await;
        assert!(matches!(
            planet,
            Err(FavoriteServiceError::PlanetNotFound(9999))
        ));
    }

    #[tokio::test]
    async fn test_listing_embeds_full_objects() {
        let (_pool, f) = setup().await;

        f.service
            .add_character(f.user_id, f.character_id)
            .await
            .expect("Add failed");

        let favorites = f
            .service
            .list_for_user(f.user_id)
            .await
            .expect("List failed");

        let favorite = &favorites.characters[0];
        assert_eq!(favorite.character.name, "Chewbacca");
        assert_eq!(favorite.favorited_by_count, 1);
    }
}
