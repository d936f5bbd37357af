//! Shared API response types
//!
//! Canonical serialized shapes for every entity. Collection-valued
//! relations serialize as counts to bound payload size; blog posts embed
//! their three single-valued relations in full (author reduced to a
//! partial projection).

use serde::{Deserialize, Serialize};

use crate::models::{
    BlogPostWithRelations, CharacterWithRelations, PlanetWithCounts, User, UserWithCounts,
};
use crate::services::UserFavorites;

/// Simple `{"message": ...}` success body (favorites add/remove)
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Full planet response
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanetResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub surface_water: Option<String>,
    pub population: Option<String>,
    pub diameter: Option<String>,
    pub rotation_period: Option<String>,
    pub orbital_period: Option<String>,
    pub gravity: Option<String>,
    pub image_url: Option<String>,
    pub residents_count: i64,
    pub favorited_by_count: i64,
    pub created_at: String,
}

impl From<PlanetWithCounts> for PlanetResponse {
    fn from(view: PlanetWithCounts) -> Self {
        let planet = view.planet;
        Self {
            id: planet.id,
            name: planet.name,
            description: planet.description,
            climate: planet.climate,
            terrain: planet.terrain,
            surface_water: planet.surface_water,
            population: planet.population,
            diameter: planet.diameter,
            rotation_period: planet.rotation_period,
            orbital_period: planet.orbital_period,
            gravity: planet.gravity,
            image_url: planet.image_url,
            residents_count: view.residents_count,
            favorited_by_count: view.favorited_by_count,
            created_at: planet.created_at.to_rfc3339(),
        }
    }
}

/// Full character response with embedded homeworld
#[derive(Debug, Serialize, Deserialize)]
pub struct CharacterResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub image_url: Option<String>,
    /// Serialized exactly like the planet's standalone representation
    pub homeworld: Option<PlanetResponse>,
    pub favorited_by_count: i64,
    pub created_at: String,
}

impl From<CharacterWithRelations> for CharacterResponse {
    fn from(view: CharacterWithRelations) -> Self {
        let character = view.character;
        Self {
            id: character.id,
            name: character.name,
            description: character.description,
            height: character.height,
            mass: character.mass,
            hair_color: character.hair_color,
            skin_color: character.skin_color,
            eye_color: character.eye_color,
            birth_year: character.birth_year,
            gender: character.gender,
            image_url: character.image_url,
            homeworld: view.homeworld.map(Into::into),
            favorited_by_count: view.favorited_by_count,
            created_at: character.created_at.to_rfc3339(),
        }
    }
}

/// Full user response. Carries relation counts, never the password.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub favorite_characters_count: i64,
    pub favorite_planets_count: i64,
    pub blog_posts_count: i64,
}

impl From<UserWithCounts> for UserResponse {
    fn from(view: UserWithCounts) -> Self {
        let user = view.user;
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            created_at: user.created_at.to_rfc3339(),
            favorite_characters_count: view.favorite_characters_count,
            favorite_planets_count: view.favorite_planets_count,
            blog_posts_count: view.blog_posts_count,
        }
    }
}

/// Reduced author projection embedded in blog post responses
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub id: i64,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<User> for AuthorInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Full blog post response with embedded relations
#[derive(Debug, Serialize, Deserialize)]
pub struct BlogPostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub is_published: bool,
    pub view_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub author: AuthorInfo,
    pub featured_character: Option<CharacterResponse>,
    pub featured_planet: Option<PlanetResponse>,
}

impl From<BlogPostWithRelations> for BlogPostResponse {
    fn from(view: BlogPostWithRelations) -> Self {
        let post = view.post;
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            summary: post.summary,
            is_published: post.is_published,
            view_count: post.view_count,
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
            author: view.author.into(),
            featured_character: view.featured_character.map(Into::into),
            featured_planet: view.featured_planet.map(Into::into),
        }
    }
}

/// Both favorites collections for a user
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub characters: Vec<CharacterResponse>,
    pub planets: Vec<PlanetResponse>,
}

impl From<UserFavorites> for FavoritesResponse {
    fn from(favorites: UserFavorites) -> Self {
        Self {
            characters: favorites.characters.into_iter().map(Into::into).collect(),
            planets: favorites.planets.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlogPost, Character, NewUser, Planet};
    use chrono::Utc;

    fn planet() -> PlanetWithCounts {
        PlanetWithCounts {
            planet: Planet {
                id: 1,
                name: "Dagobah".to_string(),
                description: None,
                climate: Some("murky".to_string()),
                terrain: Some("swamp".to_string()),
                surface_water: None,
                population: None,
                diameter: None,
                rotation_period: None,
                orbital_period: None,
                gravity: None,
                image_url: None,
                created_at: Utc::now(),
            },
            residents_count: 1,
            favorited_by_count: 0,
        }
    }

    fn character() -> CharacterWithRelations {
        CharacterWithRelations {
            character: Character {
                id: 2,
                name: "Yoda".to_string(),
                description: None,
                height: Some("66 cm".to_string()),
                mass: None,
                hair_color: None,
                skin_color: Some("green".to_string()),
                eye_color: None,
                birth_year: Some("896BBY".to_string()),
                gender: None,
                image_url: None,
                homeworld_id: Some(1),
                created_at: Utc::now(),
            },
            homeworld: Some(planet()),
            favorited_by_count: 3,
        }
    }

    fn user() -> User {
        let mut user = User::new(NewUser {
            email: "yoda@jedi.sw".to_string(),
            password: "do-or-do-not".to_string(),
            username: "yoda".to_string(),
            first_name: None,
            last_name: None,
        });
        user.id = 7;
        user
    }

    #[test]
    fn test_user_response_has_no_password_key() {
        let response = UserResponse::from(UserWithCounts {
            user: user(),
            favorite_characters_count: 0,
            favorite_planets_count: 0,
            blog_posts_count: 0,
        });

        let json = serde_json::to_value(&response).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("password"));
        assert_eq!(obj["username"], "yoda");
    }

    #[test]
    fn test_character_embeds_homeworld_serialization() {
        let json = serde_json::to_value(CharacterResponse::from(character())).unwrap();

        assert_eq!(json["homeworld"]["name"], "Dagobah");
        assert_eq!(json["homeworld"]["residents_count"], 1);
        assert_eq!(json["favorited_by_count"], 3);
    }

    #[test]
    fn test_blog_post_author_is_reduced_projection() {
        let now = Utc::now();
        let response = BlogPostResponse::from(BlogPostWithRelations {
            post: BlogPost {
                id: 9,
                title: "Size matters not".to_string(),
                content: "Judge me by my size, do you?".to_string(),
                summary: None,
                is_published: true,
                view_count: 12,
                created_at: now,
                updated_at: now,
                author_id: 7,
                featured_character_id: Some(2),
                featured_planet_id: None,
            },
            author: user(),
            featured_character: Some(character()),
            featured_planet: None,
        });

        let json = serde_json::to_value(&response).unwrap();
        let author = json["author"].as_object().unwrap();

        // Exactly the partial projection, no email or password
        assert_eq!(author.len(), 4);
        assert_eq!(author["id"], 7);
        assert_eq!(author["username"], "yoda");
        assert!(!author.contains_key("email"));
        assert!(!author.contains_key("password"));

        assert_eq!(json["featured_character"]["name"], "Yoda");
        assert!(json["featured_planet"].is_null());
    }

    #[test]
    fn test_favorites_response_has_exactly_two_keys() {
        let response = FavoritesResponse::from(UserFavorites {
            characters: vec![character()],
            planets: vec![],
        });

        let json = serde_json::to_value(&response).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 2);
        assert!(obj["characters"].is_array());
        assert!(obj["planets"].is_array());
        assert_eq!(obj["characters"][0]["name"], "Yoda");
    }
}
