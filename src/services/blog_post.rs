//! Blog post service
//!
//! Business logic for the blog post lifecycle. The model is complete but
//! deliberately unrouted; the API surface ships without blog post
//! endpoints, so this service is reachable only through the library.

use std::sync::Arc;

use anyhow::Context;

use super::{store_violation, StoreViolation};
use crate::db::repositories::{
    BlogPostRepository, CharacterRepository, PlanetRepository, UserRepository,
};
use crate::models::{BlogPost, BlogPostWithRelations, CreateBlogPostInput, UpdateBlogPostInput};

/// Error types for blog post operations
#[derive(Debug, thiserror::Error)]
pub enum BlogPostServiceError {
    #[error("Blog post not found")]
    NotFound(i64),

    /// author_id doesn't reference an existing user
    #[error("User not found")]
    AuthorNotFound(i64),

    /// featured_character_id doesn't reference an existing character
    #[error("Character not found")]
    CharacterNotFound(i64),

    /// featured_planet_id doesn't reference an existing planet
    #[error("Planet not found")]
    PlanetNotFound(i64),

    /// NOT NULL / foreign key / check violation at the store
    #[error("{0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Blog post service
pub struct BlogPostService {
    posts: Arc<dyn BlogPostRepository>,
    users: Arc<dyn UserRepository>,
    characters: Arc<dyn CharacterRepository>,
    planets: Arc<dyn PlanetRepository>,
}

impl BlogPostService {
    pub fn new(
        posts: Arc<dyn BlogPostRepository>,
        users: Arc<dyn UserRepository>,
        characters: Arc<dyn CharacterRepository>,
        planets: Arc<dyn PlanetRepository>,
    ) -> Self {
        Self {
            posts,
            users,
            characters,
            planets,
        }
    }

    /// Create a blog post after verifying its references exist.
    pub async fn create(
        &self,
        input: &CreateBlogPostInput,
    ) -> Result<BlogPostWithRelations, BlogPostServiceError> {
        self.users
            .get_by_id(input.author_id)
            .await?
            .ok_or(BlogPostServiceError::AuthorNotFound(input.author_id))?;

        if let Some(character_id) = input.featured_character_id {
            self.characters
                .get_by_id(character_id)
                .await?
                .ok_or(BlogPostServiceError::CharacterNotFound(character_id))?;
        }
        if let Some(planet_id) = input.featured_planet_id {
            self.planets
                .get_by_id(planet_id)
                .await?
                .ok_or(BlogPostServiceError::PlanetNotFound(planet_id))?;
        }

        let post = match self.posts.create(input).await {
            Ok(post) => post,
            Err(err) => {
                return Err(match store_violation(&err) {
                    Some(StoreViolation::Unique(msg))
                    | Some(StoreViolation::Constraint(msg)) => {
                        BlogPostServiceError::InvalidInput(msg)
                    }
                    None => BlogPostServiceError::Internal(err),
                })
            }
        };

        self.with_relations(post).await
    }

    /// Get a blog post by id with author and featured entities loaded
    pub async fn get(&self, id: i64) -> Result<BlogPostWithRelations, BlogPostServiceError> {
        let post = self
            .posts
            .get_by_id(id)
            .await?
            .ok_or(BlogPostServiceError::NotFound(id))?;

        self.with_relations(post).await
    }

    /// List all posts authored by a user
    pub async fn list_by_author(
        &self,
        author_id: i64,
    ) -> Result<Vec<BlogPost>, BlogPostServiceError> {
        self.users
            .get_by_id(author_id)
            .await?
            .ok_or(BlogPostServiceError::AuthorNotFound(author_id))?;

        Ok(self.posts.list_by_author(author_id).await?)
    }

    /// Apply field changes to a post. Any mutation refreshes `updated_at`.
    pub async fn update(
        &self,
        id: i64,
        input: &UpdateBlogPostInput,
    ) -> Result<BlogPostWithRelations, BlogPostServiceError> {
        let post = self
            .posts
            .update(id, input)
            .await?
            .ok_or(BlogPostServiceError::NotFound(id))?;

        self.with_relations(post).await
    }

    /// Record one view of a post
    pub async fn record_view(&self, id: i64) -> Result<BlogPost, BlogPostServiceError> {
        self.posts
            .increment_view_count(id)
            .await?
            .ok_or(BlogPostServiceError::NotFound(id))
    }

    async fn with_relations(
        &self,
        post: BlogPost,
    ) -> Result<BlogPostWithRelations, BlogPostServiceError> {
        // The author FK is NOT NULL, so a missing row here is store corruption
        let author = self
            .users
            .get_by_id(post.author_id)
            .await?
            .context("Blog post author missing")?;

        let featured_character = match post.featured_character_id {
            Some(character_id) => self.characters.get_with_relations(character_id).await?,
            None => None,
        };
        let featured_planet = match post.featured_planet_id {
            Some(planet_id) => self.planets.get_with_counts(planet_id).await?,
            None => None,
        };

        Ok(BlogPostWithRelations {
            post,
            author,
            featured_character,
            featured_planet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        SqlxBlogPostRepository, SqlxCharacterRepository, SqlxPlanetRepository, SqlxUserRepository,
    };
    use crate::db::{create_test_pool, migrations, DbPool};
    use crate::models::{CreateCharacterInput, CreatePlanetInput, NewUser};

    async fn setup() -> (DbPool, BlogPostService, i64) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let users = SqlxUserRepository::boxed(pool.clone());
        let author = users
            .create(&NewUser {
                email: "obiwan@jedi.sw".to_string(),
                password: "highground".to_string(),
                username: "obiwan".to_string(),
                first_name: None,
                last_name: None,
            })
            .await
            .expect("User create failed");

        let service = BlogPostService::new(
            SqlxBlogPostRepository::boxed(pool.clone()),
            users,
            SqlxCharacterRepository::boxed(pool.clone()),
            SqlxPlanetRepository::boxed(pool.clone()),
        );

        (pool, service, author.id)
    }

    fn post_input(author_id: i64) -> CreateBlogPostInput {
        CreateBlogPostInput {
            title: "On lightsabers".to_string(),
            content: "An elegant weapon for a more civilized age.".to_string(),
            summary: None,
            author_id,
            featured_character_id: None,
            featured_planet_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let (_pool, service, author_id) = setup().await;

        let created = service
            .create(&post_input(author_id))
            .await
            .expect("Create failed");

        assert!(!created.post.is_published);
        assert_eq!(created.post.view_count, 0);
        assert_eq!(created.author.username, "obiwan");
        assert!(created.featured_character.is_none());
        assert!(created.featured_planet.is_none());
    }

    #[tokio::test]
    async fn test_create_with_unknown_author_fails() {
        let (_pool, service, _author_id) = setup().await;

        let result = service.create(&post_input(777)).await;
        assert!(matches!(
            result,
            Err(BlogPostServiceError::AuthorNotFound(777))
        ));
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let (_pool, service, author_id) = setup().await;

        let created = service
            .create(&post_input(author_id))
            .await
            .expect("Create failed");

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = service
            .update(
                created.post.id,
                &UpdateBlogPostInput {
                    is_published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect("Update failed");

        assert!(updated.post.is_published);
        assert!(updated.post.updated_at > created.post.updated_at);
        assert_eq!(updated.post.created_at, created.post.created_at);
        // Unchanged fields are preserved
        assert_eq!(updated.post.title, "On lightsabers");
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let (_pool, service, _author_id) = setup().await;

        let result = service.update(31337, &UpdateBlogPostInput::default()).await;
        assert!(matches!(result, Err(BlogPostServiceError::NotFound(31337))));
    }

    #[tokio::test]
    async fn test_record_view_increments() {
        let (_pool, service, author_id) = setup().await;

        let created = service
            .create(&post_input(author_id))
            .await
            .expect("Create failed");

        service.record_view(created.post.id).await.expect("View failed");
        let post = service.record_view(created.post.id).await.expect("View failed");

        assert_eq!(post.view_count, 2);
    }

    #[tokio::test]
    async fn test_featured_entities_are_embedded() {
        let (pool, service, author_id) = setup().await;

        let planets = SqlxPlanetRepository::boxed(pool.clone());
        let characters = SqlxCharacterRepository::boxed(pool.clone());

        let planet = planets
            .create(&CreatePlanetInput {
                name: Some("Naboo".to_string()),
                ..Default::default()
            })
            .await
            .expect("Planet create failed");
        let character = characters
            .create(&CreateCharacterInput {
                name: Some("Padmé Amidala".to_string()),
                homeworld_id: Some(planet.id),
                ..Default::default()
            })
            .await
            .expect("Character create failed");

        let mut input = post_input(author_id);
        input.featured_character_id = Some(character.id);
        input.featured_planet_id = Some(planet.id);

        let created = service.create(&input).await.expect("Create failed");

        let featured_character = created
            .featured_character
            .expect("Featured character should be embedded");
        assert_eq!(featured_character.character.name, "Padmé Amidala");
        let homeworld = featured_character
            .homeworld
            .expect("Homeworld should be embedded");
        assert_eq!(homeworld.planet.name, "Naboo");

        let featured_planet = created
            .featured_planet
            .expect("Featured planet should be embedded");
        assert_eq!(featured_planet.planet.id, planet.id);
        assert_eq!(featured_planet.residents_count, 1);
    }
}
