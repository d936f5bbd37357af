//! Data models
//!
//! This module contains all data structures used throughout the Starblog API.
//! Models represent:
//! - Database entities (User, Character, Planet, BlogPost)
//! - Typed create/update inputs
//! - Composite views of an entity plus its loaded relations and counts

mod blog_post;
mod character;
mod planet;
mod user;

pub use blog_post::{BlogPost, BlogPostWithRelations, CreateBlogPostInput, UpdateBlogPostInput};
pub use character::{Character, CharacterWithRelations, CreateCharacterInput};
pub use planet::{CreatePlanetInput, Planet, PlanetWithCounts};
pub use user::{NewUser, User, UserWithCounts};
