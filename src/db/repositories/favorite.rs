//! Favorite repository
//!
//! Database operations for the two favorites association sets,
//! (user, character) and (user, planet). Adds and removes are single
//! statements whose `rows_affected` distinguishes a new pair from an
//! already-present or absent one, so no separate existence read is needed
//! for idempotency.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::character::{attach_homeworld, character_with_count_sql};
use super::planet::{planet_with_counts_sql, row_to_planet_with_counts};
use crate::db::DbPool;
use crate::models::{CharacterWithRelations, PlanetWithCounts};

/// Favorite repository trait
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Add a (user, character) pair. Returns false if the pair already existed.
    async fn add_character(&self, user_id: i64, character_id: i64) -> Result<bool>;

    /// Remove a (user, character) pair. Returns false if the pair was absent.
    async fn remove_character(&self, user_id: i64, character_id: i64) -> Result<bool>;

    /// Add a (user, planet) pair. Returns false if the pair already existed.
    async fn add_planet(&self, user_id: i64, planet_id: i64) -> Result<bool>;

    /// Remove a (user, planet) pair. Returns false if the pair was absent.
    async fn remove_planet(&self, user_id: i64, planet_id: i64) -> Result<bool>;

    /// All characters favorited by a user, fully loaded
    async fn characters_for_user(&self, user_id: i64) -> Result<Vec<CharacterWithRelations>>;

    /// All planets favorited by a user, fully loaded
    async fn planets_for_user(&self, user_id: i64) -> Result<Vec<PlanetWithCounts>>;
}

/// SQLx-based favorite repository implementation
pub struct SqlxFavoriteRepository {
    pool: DbPool,
}

impl SqlxFavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DbPool) -> Arc<dyn FavoriteRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl FavoriteRepository for SqlxFavoriteRepository {
    async fn add_character(&self, user_id: i64, character_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO user_favorite_characters (user_id, character_id) VALUES (?, ?)",
        )
        .bind(user_id)
        .bind(character_id)
        .execute(&self.pool)
        .await
        .context("Failed to add favorite character")?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_character(&self, user_id: i64, character_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM user_favorite_characters WHERE user_id = ? AND character_id = ?",
        )
        .bind(user_id)
        .bind(character_id)
        .execute(&self.pool)
        .await
        .context("Failed to remove favorite character")?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_planet(&self, user_id: i64, planet_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO user_favorite_planets (user_id, planet_id) VALUES (?, ?)",
        )
        .bind(user_id)
        .bind(planet_id)
        .execute(&self.pool)
        .await
        .context("Failed to add favorite planet")?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_planet(&self, user_id: i64, planet_id: i64) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM user_favorite_planets WHERE user_id = ? AND planet_id = ?")
                .bind(user_id)
                .bind(planet_id)
                .execute(&self.pool)
                .await
                .context("Failed to remove favorite planet")?;

        Ok(result.rows_affected() > 0)
    }

    async fn characters_for_user(&self, user_id: i64) -> Result<Vec<CharacterWithRelations>> {
        let rows = sqlx::query(&character_with_count_sql(
            "JOIN user_favorite_characters uf ON uf.character_id = c.id \
             WHERE uf.user_id = ? ORDER BY c.id",
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list favorite characters")?;

        let mut characters = Vec::with_capacity(rows.len());
        for row in &rows {
            characters.push(attach_homeworld(&self.pool, row).await?);
        }

        Ok(characters)
    }

    async fn planets_for_user(&self, user_id: i64) -> Result<Vec<PlanetWithCounts>> {
        let rows = sqlx::query(&planet_with_counts_sql(
            "JOIN user_favorite_planets uf ON uf.planet_id = p.id \
             WHERE uf.user_id = ? ORDER BY p.id",
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list favorite planets")?;

        rows.iter().map(row_to_planet_with_counts).collect()
    }
}
