//! Character repository
//!
//! Database operations for characters. `*_with_relations` queries load the
//! favorited-by count inline and embed the homeworld (with its own counts)
//! through the planet repository helpers, so an embedded planet always
//! matches the planet's standalone representation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::sync::Arc;

use super::planet::fetch_planet_with_counts;
use crate::db::DbPool;
use crate::models::{Character, CharacterWithRelations, CreateCharacterInput};

/// Character repository trait
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Insert a new character and return the stored row
    async fn create(&self, input: &CreateCharacterInput) -> Result<Character>;

    /// Get character by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Character>>;

    /// Get character by ID with homeworld and favorite count loaded
    async fn get_with_relations(&self, id: i64) -> Result<Option<CharacterWithRelations>>;

    /// List all characters with homeworld and favorite count loaded
    async fn list_with_relations(&self) -> Result<Vec<CharacterWithRelations>>;
}

/// SQLx-based character repository implementation
pub struct SqlxCharacterRepository {
    pool: DbPool,
}

impl SqlxCharacterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DbPool) -> Arc<dyn CharacterRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CharacterRepository for SqlxCharacterRepository {
    async fn create(&self, input: &CreateCharacterInput) -> Result<Character> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO characters
                (name, description, height, mass, hair_color, skin_color, eye_color,
                 birth_year, gender, image_url, homeworld_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.height)
        .bind(&input.mass)
        .bind(&input.hair_color)
        .bind(&input.skin_color)
        .bind(&input.eye_color)
        .bind(&input.birth_year)
        .bind(&input.gender)
        .bind(&input.image_url)
        .bind(input.homeworld_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        fetch_character_by_id(&self.pool, id)
            .await?
            .context("Character row missing after insert")
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Character>> {
        fetch_character_by_id(&self.pool, id).await
    }

    async fn get_with_relations(&self, id: i64) -> Result<Option<CharacterWithRelations>> {
        fetch_character_with_relations(&self.pool, id).await
    }

    async fn list_with_relations(&self) -> Result<Vec<CharacterWithRelations>> {
        let rows = sqlx::query(&character_with_count_sql("ORDER BY c.id"))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list characters")?;

        let mut characters = Vec::with_capacity(rows.len());
        for row in &rows {
            characters.push(attach_homeworld(&self.pool, row).await?);
        }

        Ok(characters)
    }
}

// ============================================================================
// Shared query helpers (also used by the favorite repository)
// ============================================================================

pub(crate) fn character_with_count_sql(suffix: &str) -> String {
    format!(
        r#"
        SELECT c.id, c.name, c.description, c.height, c.mass, c.hair_color,
               c.skin_color, c.eye_color, c.birth_year, c.gender, c.image_url,
               c.homeworld_id, c.created_at,
               (SELECT COUNT(*) FROM user_favorite_characters f WHERE f.character_id = c.id) AS favorited_by_count
        FROM characters c
        {}
        "#,
        suffix
    )
}

async fn fetch_character_by_id(pool: &DbPool, id: i64) -> Result<Option<Character>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, description, height, mass, hair_color, skin_color,
               eye_color, birth_year, gender, image_url, homeworld_id, created_at
        FROM characters
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get character by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_character(&row)?)),
        None => Ok(None),
    }
}

pub(crate) async fn fetch_character_with_relations(
    pool: &DbPool,
    id: i64,
) -> Result<Option<CharacterWithRelations>> {
    let row = sqlx::query(&character_with_count_sql("WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get character with relations")?;

    match row {
        Some(row) => Ok(Some(attach_homeworld(pool, &row).await?)),
        None => Ok(None),
    }
}

/// Build a `CharacterWithRelations` from a `character_with_count_sql` row,
/// loading the homeworld when the foreign key is set.
pub(crate) async fn attach_homeworld(
    pool: &DbPool,
    row: &SqliteRow,
) -> Result<CharacterWithRelations> {
    let character = row_to_character(row)?;
    let favorited_by_count = row.try_get("favorited_by_count")?;

    let homeworld = match character.homeworld_id {
        Some(planet_id) => fetch_planet_with_counts(pool, planet_id).await?,
        None => None,
    };

    Ok(CharacterWithRelations {
        character,
        homeworld,
        favorited_by_count,
    })
}

fn row_to_character(row: &SqliteRow) -> Result<Character> {
    Ok(Character {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        height: row.try_get("height")?,
        mass: row.try_get("mass")?,
        hair_color: row.try_get("hair_color")?,
        skin_color: row.try_get("skin_color")?,
        eye_color: row.try_get("eye_color")?,
        birth_year: row.try_get("birth_year")?,
        gender: row.try_get("gender")?,
        image_url: row.try_get("image_url")?,
        homeworld_id: row.try_get("homeworld_id")?,
        created_at: row.try_get("created_at")?,
    })
}
