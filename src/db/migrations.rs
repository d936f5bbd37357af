//! Database migrations
//!
//! Code-based migrations for the Starblog schema. All migrations are
//! embedded as SQL strings so the binary is self-contained; applied
//! versions are tracked in the `_migrations` table.
//!
//! The schema is the four entity tables (users, planets, characters,
//! blog_posts) plus the two pure association tables for favorites, whose
//! composite primary keys make duplicate favorite pairs impossible.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::DbPool;

/// A database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (must be unique and sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements, separated by semicolons
    pub up: &'static str,
}

/// Migration record stored in the database
#[derive(Debug, Clone)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

/// All migrations for the Starblog schema.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_users",
        up: r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email VARCHAR(120) NOT NULL UNIQUE,
                password VARCHAR(255) NOT NULL,
                username VARCHAR(80) NOT NULL UNIQUE,
                first_name VARCHAR(50),
                last_name VARCHAR(50),
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);
            CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
        "#,
    },
    Migration {
        version: 2,
        name: "create_planets",
        up: r#"
            CREATE TABLE IF NOT EXISTS planets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                description TEXT,
                climate VARCHAR(100),
                terrain VARCHAR(100),
                surface_water VARCHAR(20),
                population VARCHAR(50),
                diameter VARCHAR(20),
                rotation_period VARCHAR(20),
                orbital_period VARCHAR(20),
                gravity VARCHAR(20),
                image_url VARCHAR(500),
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#,
    },
    Migration {
        version: 3,
        name: "create_characters",
        up: r#"
            CREATE TABLE IF NOT EXISTS characters (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                description TEXT,
                height VARCHAR(20),
                mass VARCHAR(20),
                hair_color VARCHAR(50),
                skin_color VARCHAR(50),
                eye_color VARCHAR(50),
                birth_year VARCHAR(20),
                gender VARCHAR(20),
                image_url VARCHAR(500),
                homeworld_id INTEGER REFERENCES planets(id),
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_characters_homeworld_id ON characters(homeworld_id);
        "#,
    },
    Migration {
        version: 4,
        name: "create_blog_posts",
        up: r#"
            CREATE TABLE IF NOT EXISTS blog_posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(200) NOT NULL,
                content TEXT NOT NULL,
                summary VARCHAR(500),
                is_published BOOLEAN NOT NULL DEFAULT 0,
                view_count INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                author_id INTEGER NOT NULL REFERENCES users(id),
                featured_character_id INTEGER REFERENCES characters(id),
                featured_planet_id INTEGER REFERENCES planets(id)
            );
            CREATE INDEX IF NOT EXISTS idx_blog_posts_author_id ON blog_posts(author_id);
        "#,
    },
    Migration {
        version: 5,
        name: "create_favorites",
        up: r#"
            CREATE TABLE IF NOT EXISTS user_favorite_characters (
                user_id INTEGER NOT NULL REFERENCES users(id),
                character_id INTEGER NOT NULL REFERENCES characters(id),
                PRIMARY KEY (user_id, character_id)
            );
            CREATE INDEX IF NOT EXISTS idx_favorite_characters_character_id
                ON user_favorite_characters(character_id);
            CREATE TABLE IF NOT EXISTS user_favorite_planets (
                user_id INTEGER NOT NULL REFERENCES users(id),
                planet_id INTEGER NOT NULL REFERENCES planets(id),
                PRIMARY KEY (user_id, planet_id)
            );
            CREATE INDEX IF NOT EXISTS idx_favorite_planets_planet_id
                ON user_favorite_planets(planet_id);
        "#,
    },
];

/// Run all pending migrations
///
/// Creates the tracking table if needed, then applies every migration whose
/// version is not yet recorded, in order. Returns the number applied.
pub async fn run_migrations(pool: &DbPool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied = get_applied_migrations(pool).await?;
    let applied_versions: Vec<i32> = applied.iter().map(|m| m.version as i32).collect();

    let mut count = 0;

    for migration in MIGRATIONS {
        if !applied_versions.contains(&migration.version) {
            tracing::info!(
                "Applying migration {}: {}",
                migration.version,
                migration.name
            );
            apply_migration(pool, migration)
                .await
                .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

/// Create the migrations tracking table if it doesn't exist
async fn create_migrations_table(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create migrations table")?;

    Ok(())
}

/// Get list of already applied migrations
async fn get_applied_migrations(pool: &DbPool) -> Result<Vec<MigrationRecord>> {
    let rows = sqlx::query("SELECT version, name, applied_at FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await?;

    let mut records = Vec::new();
    for row in rows {
        records.push(MigrationRecord {
            version: row.get("version"),
            name: row.get("name"),
            applied_at: row.get("applied_at"),
        });
    }

    Ok(records)
}

/// Apply a single migration
async fn apply_migration(pool: &DbPool, migration: &Migration) -> Result<()> {
    for statement in migration.up.split(';') {
        let statement = statement.trim();
        if !statement.is_empty() {
            sqlx::query(statement)
                .execute(pool)
                .await
                .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
        }
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Truncate SQL for error messages
fn truncate_sql(sql: &str) -> String {
    if sql.len() > 100 {
        format!("{}...", &sql[..100])
    } else {
        sql.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[test]
    fn test_migration_versions_unique_and_ordered() {
        let mut last = 0;
        for migration in MIGRATIONS {
            assert!(
                migration.version > last,
                "Migration versions must be strictly increasing"
            );
            last = migration.version;
        }
    }

    #[tokio::test]
    async fn test_run_migrations_applies_all() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        let count = run_migrations(&pool).await.expect("Migrations failed");
        assert_eq!(count, MIGRATIONS.len());

        // All six tables exist
        for table in [
            "users",
            "planets",
            "characters",
            "blog_posts",
            "user_favorite_characters",
            "user_favorite_planets",
        ] {
            let row = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table)
                .fetch_optional(&pool)
                .await
                .expect("Failed to query sqlite_master");
            assert!(row.is_some(), "Missing table: {}", table);
        }
    }

    #[tokio::test]
    async fn test_run_migrations_is_idempotent() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        run_migrations(&pool).await.expect("First run failed");
        let second = run_migrations(&pool).await.expect("Second run failed");

        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn test_duplicate_favorite_pair_rejected() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Migrations failed");

        sqlx::query("INSERT INTO users (email, password, username) VALUES ('a@b.c', 'pw', 'a')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO planets (name) VALUES ('Tatooine')")
            .execute(&pool)
            .await
            .unwrap();

        sqlx::query("INSERT INTO user_favorite_planets (user_id, planet_id) VALUES (1, 1)")
            .execute(&pool)
            .await
            .unwrap();

        let dup = sqlx::query("INSERT INTO user_favorite_planets (user_id, planet_id) VALUES (1, 1)")
            .execute(&pool)
            .await;
        assert!(dup.is_err());
    }
}
