//! User model
//!
//! This module defines the User entity for the Starblog API. Users author
//! blog posts and keep two independent favorites sets (characters, planets).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered blog user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Email address (unique)
    pub email: String,
    /// Stored password. Never leaves the process: skipped on serialization
    /// and excluded from every response type.
    #[serde(skip_serializing)]
    pub password: String,
    /// Username (unique)
    pub username: String,
    /// First name (optional)
    pub first_name: Option<String>,
    /// Last name (optional)
    pub last_name: Option<String>,
    /// Active flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with defaults applied (active, created now).
    ///
    /// The id is assigned by the database on insert.
    pub fn new(input: NewUser) -> Self {
        Self {
            id: 0,
            email: input.email,
            password: input.password,
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address
    pub email: String,
    /// Password as provided
    pub password: String,
    /// Username
    pub username: String,
    /// First name (optional)
    pub first_name: Option<String>,
    /// Last name (optional)
    pub last_name: Option<String>,
}

/// A user together with the cardinalities of its relations.
///
/// The counts are computed by the store on demand, never maintained as
/// back-pointers on the entity.
#[derive(Debug, Clone)]
pub struct UserWithCounts {
    pub user: User,
    pub favorite_characters_count: i64,
    pub favorite_planets_count: i64,
    pub blog_posts_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> NewUser {
        NewUser {
            email: "luke@rebellion.org".to_string(),
            password: "secret".to_string(),
            username: "luke".to_string(),
            first_name: Some("Luke".to_string()),
            last_name: Some("Skywalker".to_string()),
        }
    }

    #[test]
    fn test_user_new_defaults() {
        let user = User::new(sample_input());

        assert_eq!(user.id, 0);
        assert_eq!(user.email, "luke@rebellion.org");
        assert_eq!(user.username, "luke");
        assert!(user.is_active);
    }

    #[test]
    fn test_user_serialization_omits_password() {
        let user = User::new(sample_input());

        let json = serde_json::to_value(&user).unwrap();
        let obj = json.as_object().unwrap();

        assert!(!obj.contains_key("password"));
        assert_eq!(obj["username"], "luke");
        assert_eq!(obj["is_active"], true);
    }
}
