//! Services layer - business logic
//!
//! One service per resource. Services perform existence checks and raise
//! typed errors before touching the store for mutation, and translate
//! store-level constraint violations into typed errors instead of letting
//! them surface as opaque faults.

pub mod blog_post;
pub mod character;
pub mod favorite;
pub mod planet;
pub mod user;

pub use blog_post::{BlogPostService, BlogPostServiceError};
pub use character::{CharacterService, CharacterServiceError};
pub use favorite::{FavoriteOutcome, FavoriteService, FavoriteServiceError, UserFavorites};
pub use planet::{PlanetService, PlanetServiceError};
pub use user::{UserService, UserServiceError};

use sqlx::error::ErrorKind;

/// A store-level constraint violation pulled out of an error chain.
pub(crate) enum StoreViolation {
    /// Duplicate value for a unique column
    Unique(String),
    /// NOT NULL, foreign key, or check constraint failure
    Constraint(String),
}

/// Inspect an error chain for a sqlx database error with a constraint kind.
///
/// Returns None for connection faults and other non-constraint failures,
/// which stay internal errors.
pub(crate) fn store_violation(err: &anyhow::Error) -> Option<StoreViolation> {
    let db = err.downcast_ref::<sqlx::Error>()?.as_database_error()?;
    match db.kind() {
        ErrorKind::UniqueViolation => Some(StoreViolation::Unique(db.message().to_string())),
        ErrorKind::ForeignKeyViolation | ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
            Some(StoreViolation::Constraint(db.message().to_string()))
        }
        _ => None,
    }
}
