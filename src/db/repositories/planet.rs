//! Planet repository
//!
//! Database operations for planets. The `*_with_counts` queries compute
//! residents and favorited-by cardinalities with correlated subqueries over
//! the homeworld index and the favorites association table.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::{CreatePlanetInput, Planet, PlanetWithCounts};

/// Planet repository trait
#[async_trait]
pub trait PlanetRepository: Send + Sync {
    /// Insert a new planet and return the stored row
    async fn create(&self, input: &CreatePlanetInput) -> Result<Planet>;

    /// Get planet by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Planet>>;

    /// Get planet by ID together with its relation counts
    async fn get_with_counts(&self, id: i64) -> Result<Option<PlanetWithCounts>>;

    /// List all planets with relation counts
    async fn list_with_counts(&self) -> Result<Vec<PlanetWithCounts>>;
}

/// SQLx-based planet repository implementation
pub struct SqlxPlanetRepository {
    pool: DbPool,
}

impl SqlxPlanetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DbPool) -> Arc<dyn PlanetRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PlanetRepository for SqlxPlanetRepository {
    async fn create(&self, input: &CreatePlanetInput) -> Result<Planet> {
        let now = Utc::now();

        // Absent fields bind as NULL; the NOT NULL constraint on name is
        // the only validation.
        let result = sqlx::query(
            r#"
            INSERT INTO planets
                (name, description, climate, terrain, surface_water, population,
                 diameter, rotation_period, orbital_period, gravity, image_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.climate)
        .bind(&input.terrain)
        .bind(&input.surface_water)
        .bind(&input.population)
        .bind(&input.diameter)
        .bind(&input.rotation_period)
        .bind(&input.orbital_period)
        .bind(&input.gravity)
        .bind(&input.image_url)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        fetch_planet_by_id(&self.pool, id)
            .await?
            .context("Planet row missing after insert")
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Planet>> {
        fetch_planet_by_id(&self.pool, id).await
    }

    async fn get_with_counts(&self, id: i64) -> Result<Option<PlanetWithCounts>> {
        fetch_planet_with_counts(&self.pool, id).await
    }

    async fn list_with_counts(&self) -> Result<Vec<PlanetWithCounts>> {
        let rows = sqlx::query(&planet_with_counts_sql("ORDER BY p.id"))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list planets")?;

        rows.iter().map(row_to_planet_with_counts).collect()
    }
}

// ============================================================================
// Shared query helpers (also used by the character and favorite repositories
// to embed planets consistently)
// ============================================================================

pub(crate) fn planet_with_counts_sql(suffix: &str) -> String {
    format!(
        r#"
        SELECT p.id, p.name, p.description, p.climate, p.terrain, p.surface_water,
               p.population, p.diameter, p.rotation_period, p.orbital_period,
               p.gravity, p.image_url, p.created_at,
               (SELECT COUNT(*) FROM characters c WHERE c.homeworld_id = p.id) AS residents_count,
               (SELECT COUNT(*) FROM user_favorite_planets f WHERE f.planet_id = p.id) AS favorited_by_count
        FROM planets p
        {}
        "#,
        suffix
    )
}

async fn fetch_planet_by_id(pool: &DbPool, id: i64) -> Result<Option<Planet>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, description, climate, terrain, surface_water, population,
               diameter, rotation_period, orbital_period, gravity, image_url, created_at
        FROM planets
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get planet by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_planet(&row)?)),
        None => Ok(None),
    }
}

pub(crate) async fn fetch_planet_with_counts(
    pool: &DbPool,
    id: i64,
) -> Result<Option<PlanetWithCounts>> {
    let row = sqlx::query(&planet_with_counts_sql("WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get planet with counts")?;

    match row {
        Some(row) => Ok(Some(row_to_planet_with_counts(&row)?)),
        None => Ok(None),
    }
}

fn row_to_planet(row: &SqliteRow) -> Result<Planet> {
    Ok(Planet {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        climate: row.try_get("climate")?,
        terrain: row.try_get("terrain")?,
        surface_water: row.try_get("surface_water")?,
        population: row.try_get("population")?,
        diameter: row.try_get("diameter")?,
        rotation_period: row.try_get("rotation_period")?,
        orbital_period: row.try_get("orbital_period")?,
        gravity: row.try_get("gravity")?,
        image_url: row.try_get("image_url")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn row_to_planet_with_counts(row: &SqliteRow) -> Result<PlanetWithCounts> {
    Ok(PlanetWithCounts {
        planet: row_to_planet(row)?,
        residents_count: row.try_get("residents_count")?,
        favorited_by_count: row.try_get("favorited_by_count")?,
    })
}
