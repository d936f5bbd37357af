//! Planet model
//!
//! Planets own zero or more resident characters (the inverse of a
//! character's homeworld) and can be favorited by users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Planet entity.
///
/// Physical attributes (population, diameter, ...) are free-form strings
/// preserving the units and formatting of the upstream catalog, e.g.
/// "200000" or "10465 km". They are stored verbatim, never parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    /// Unique identifier
    pub id: i64,
    /// Planet name
    pub name: String,
    pub description: Option<String>,
    /// e.g. "arid", "frozen"
    pub climate: Option<String>,
    /// e.g. "desert", "mountains"
    pub terrain: Option<String>,
    /// e.g. "1%"
    pub surface_water: Option<String>,
    pub population: Option<String>,
    pub diameter: Option<String>,
    /// e.g. "23 hours"
    pub rotation_period: Option<String>,
    /// e.g. "304 days"
    pub orbital_period: Option<String>,
    /// e.g. "1 standard"
    pub gravity: Option<String>,
    pub image_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating a planet.
///
/// Every field is an explicit optional: a missing request key becomes
/// `None`, and the store's column constraints are the validation boundary.
/// Unknown request keys are dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePlanetInput {
    pub name: Option<String>,
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
}

/// A planet together with its relation cardinalities.
#[derive(Debug, Clone)]
pub struct PlanetWithCounts {
    pub planet: Planet,
    /// Characters whose homeworld is this planet
    pub residents_count: i64,
    /// Users who favorited this planet
    pub favorited_by_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_unknown_keys_dropped() {
        let input: CreatePlanetInput = serde_json::from_str(
            r#"{"name": "Hoth", "climate": "frozen", "starfleet_code": "XJ9"}"#,
        )
        .unwrap();

        assert_eq!(input.name.as_deref(), Some("Hoth"));
        assert_eq!(input.climate.as_deref(), Some("frozen"));
        assert!(input.terrain.is_none());
    }

    #[test]
    fn test_create_input_missing_fields_become_none() {
        let input: CreatePlanetInput = serde_json::from_str("{}").unwrap();

        assert!(input.name.is_none());
        assert!(input.population.is_none());
    }
}
