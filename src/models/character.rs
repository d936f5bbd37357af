//! Character model
//!
//! Characters optionally reference one planet as their homeworld
//! (many-to-one) and can be favorited by users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::planet::PlanetWithCounts;

/// Character entity.
///
/// Like planets, physical attributes are free-form strings preserving the
/// upstream catalog's formatting, e.g. height "172 cm", birth year "19BBY".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier
    pub id: i64,
    /// Character name
    pub name: String,
    pub description: Option<String>,
    /// e.g. "172 cm"
    pub height: Option<String>,
    /// e.g. "77 kg"
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    /// e.g. "19BBY"
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub image_url: Option<String>,
    /// Homeworld planet id, if any
    pub homeworld_id: Option<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating a character.
///
/// Every field is an explicit optional: a missing request key becomes
/// `None`, and the store's column constraints are the validation boundary.
/// A `homeworld_id` must reference an existing planet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCharacterInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub image_url: Option<String>,
    pub homeworld_id: Option<i64>,
}

/// A character together with its loaded homeworld and favorite count.
///
/// The homeworld carries its own counts so the embedded planet serializes
/// exactly like the planet would on its own.
#[derive(Debug, Clone)]
pub struct CharacterWithRelations {
    pub character: Character,
    pub homeworld: Option<PlanetWithCounts>,
    /// Users who favorited this character
    pub favorited_by_count: i64,
}
