//! User repository
//!
//! Database operations for users. Relation counts (favorites, authored
//! posts) are computed with correlated subqueries when a serialized view is
//! needed.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::{NewUser, User, UserWithCounts};

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the stored row
    async fn create(&self, input: &NewUser) -> Result<User>;

    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Get user by ID together with its relation counts
    async fn get_with_counts(&self, id: i64) -> Result<Option<UserWithCounts>>;

    /// List all users with relation counts
    async fn list_with_counts(&self) -> Result<Vec<UserWithCounts>>;
}

/// SQLx-based user repository implementation
pub struct SqlxUserRepository {
    pool: DbPool,
}

impl SqlxUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DbPool) -> Arc<dyn UserRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, input: &NewUser) -> Result<User> {
        let mut user = User::new(input.clone());

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password, username, first_name, last_name, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.is_active)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        user.id = result.last_insert_rowid();
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password, username, first_name, last_name, is_active, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get user by ID")?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_with_counts(&self, id: i64) -> Result<Option<UserWithCounts>> {
        let row = sqlx::query(&user_with_counts_sql("WHERE u.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get user with counts")?;

        match row {
            Some(row) => Ok(Some(row_to_user_with_counts(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_with_counts(&self) -> Result<Vec<UserWithCounts>> {
        let rows = sqlx::query(&user_with_counts_sql("ORDER BY u.id"))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list users")?;

        rows.iter().map(row_to_user_with_counts).collect()
    }
}

fn user_with_counts_sql(suffix: &str) -> String {
    format!(
        r#"
        SELECT u.id, u.email, u.password, u.username, u.first_name, u.last_name,
               u.is_active, u.created_at,
               (SELECT COUNT(*) FROM user_favorite_characters fc WHERE fc.user_id = u.id) AS favorite_characters_count,
               (SELECT COUNT(*) FROM user_favorite_planets fp WHERE fp.user_id = u.id) AS favorite_planets_count,
               (SELECT COUNT(*) FROM blog_posts b WHERE b.author_id = u.id) AS blog_posts_count
        FROM users u
        {}
        "#,
        suffix
    )
}

fn row_to_user(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        username: row.try_get("username")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}

fn row_to_user_with_counts(row: &SqliteRow) -> Result<UserWithCounts> {
    Ok(UserWithCounts {
        user: row_to_user(row)?,
        favorite_characters_count: row.try_get("favorite_characters_count")?,
        favorite_planets_count: row.try_get("favorite_planets_count")?,
        blog_posts_count: row.try_get("blog_posts_count")?,
    })
}
