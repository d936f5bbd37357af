//! Repositories - data access layer
//!
//! Each repository is a trait describing the queries a resource needs plus
//! a SQLx implementation against the SQLite pool. Services depend on the
//! traits only.
//!
//! Inverse relations (a planet's residents, an entity's favorited-by set,
//! a user's post count) are computed here with indexed COUNT/join queries;
//! entities never carry back-pointers.

mod blog_post;
mod character;
mod favorite;
mod planet;
mod user;

pub use blog_post::{BlogPostRepository, SqlxBlogPostRepository};
pub use character::{CharacterRepository, SqlxCharacterRepository};
pub use favorite::{FavoriteRepository, SqlxFavoriteRepository};
pub use planet::{PlanetRepository, SqlxPlanetRepository};
pub use user::{SqlxUserRepository, UserRepository};
