//! Blog post repository
//!
//! Database operations for blog posts. Every mutating statement refreshes
//! `updated_at` alongside the change, in the same statement.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::{BlogPost, CreateBlogPostInput, UpdateBlogPostInput};

/// Blog post repository trait
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Insert a new blog post and return the stored row
    async fn create(&self, input: &CreateBlogPostInput) -> Result<BlogPost>;

    /// Get blog post by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<BlogPost>>;

    /// List all posts authored by a user
    async fn list_by_author(&self, author_id: i64) -> Result<Vec<BlogPost>>;

    /// Apply the given field changes; `None` fields are left as they are.
    /// Returns the updated row, or None if the post doesn't exist.
    async fn update(&self, id: i64, input: &UpdateBlogPostInput) -> Result<Option<BlogPost>>;

    /// Increment the view counter. Returns the updated row, or None if the
    /// post doesn't exist.
    async fn increment_view_count(&self, id: i64) -> Result<Option<BlogPost>>;
}

/// SQLx-based blog post repository implementation
pub struct SqlxBlogPostRepository {
    pool: DbPool,
}

impl SqlxBlogPostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DbPool) -> Arc<dyn BlogPostRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepository {
    async fn create(&self, input: &CreateBlogPostInput) -> Result<BlogPost> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO blog_posts
                (title, content, summary, is_published, view_count, created_at,
                 updated_at, author_id, featured_character_id, featured_planet_id)
            VALUES (?, ?, ?, 0, 0, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.summary)
        .bind(now)
        .bind(now)
        .bind(input.author_id)
        .bind(input.featured_character_id)
        .bind(input.featured_planet_id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        fetch_post_by_id(&self.pool, id)
            .await?
            .context("Blog post row missing after insert")
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<BlogPost>> {
        fetch_post_by_id(&self.pool, id).await
    }

    async fn list_by_author(&self, author_id: i64) -> Result<Vec<BlogPost>> {
        let rows = sqlx::query(&format!("{} WHERE author_id = ? ORDER BY id", SELECT_POST))
            .bind(author_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list blog posts by author")?;

        rows.iter().map(row_to_post).collect()
    }

    async fn update(&self, id: i64, input: &UpdateBlogPostInput) -> Result<Option<BlogPost>> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE blog_posts
            SET title = COALESCE(?, title),
                content = COALESCE(?, content),
                summary = COALESCE(?, summary),
                is_published = COALESCE(?, is_published),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.summary)
        .bind(input.is_published)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update blog post")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        fetch_post_by_id(&self.pool, id).await
    }

    async fn increment_view_count(&self, id: i64) -> Result<Option<BlogPost>> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE blog_posts SET view_count = view_count + 1, updated_at = ? WHERE id = ?",
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to increment view count")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        fetch_post_by_id(&self.pool, id).await
    }
}

const SELECT_POST: &str = r#"
    SELECT id, title, content, summary, is_published, view_count, created_at,
           updated_at, author_id, featured_character_id, featured_planet_id
    FROM blog_posts
"#;

async fn fetch_post_by_id(pool: &DbPool, id: i64) -> Result<Option<BlogPost>> {
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_POST))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog post by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_post(&row)?)),
        None => Ok(None),
    }
}

fn row_to_post(row: &SqliteRow) -> Result<BlogPost> {
    Ok(BlogPost {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        summary: row.try_get("summary")?,
        is_published: row.try_get("is_published")?,
        view_count: row.try_get("view_count")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        author_id: row.try_get("author_id")?,
        featured_character_id: row.try_get("featured_character_id")?,
        featured_planet_id: row.try_get("featured_planet_id")?,
    })
}
