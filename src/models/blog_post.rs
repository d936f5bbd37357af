//! Blog post model
//!
//! Blog posts belong to exactly one author and may feature at most one
//! character and one planet. The model is complete but carries no HTTP
//! routes; it is reachable through `BlogPostService`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::character::CharacterWithRelations;
use super::planet::PlanetWithCounts;
use super::user::User;

/// Blog post entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    /// Unique identifier
    pub id: i64,
    /// Post title
    pub title: String,
    /// Post body
    pub content: String,
    /// Short description (optional)
    pub summary: Option<String>,
    /// Published flag
    pub is_published: bool,
    /// View counter
    pub view_count: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
    /// Author user id (required)
    pub author_id: i64,
    /// Featured character id, if any
    pub featured_character_id: Option<i64>,
    /// Featured planet id, if any
    pub featured_planet_id: Option<i64>,
}

/// Input for creating a blog post
#[derive(Debug, Clone)]
pub struct CreateBlogPostInput {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub author_id: i64,
    pub featured_character_id: Option<i64>,
    pub featured_planet_id: Option<i64>,
}

/// Input for updating a blog post; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateBlogPostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub is_published: Option<bool>,
}

/// A blog post together with its loaded single-valued relations.
///
/// The author is kept whole here; the response layer reduces it to the
/// {id, username, first_name, last_name} projection.
#[derive(Debug, Clone)]
pub struct BlogPostWithRelations {
    pub post: BlogPost,
    pub author: User,
    pub featured_character: Option<CharacterWithRelations>,
    pub featured_planet: Option<PlanetWithCounts>,
}
