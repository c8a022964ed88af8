use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geographic point resolved from a free-text address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A user-owned place. `creator` is immutable after creation and always
/// references an existing user; the owning user's `places` list contains
/// this place's ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub image: String,
    pub creator: Uuid,
}

/// Candidate place prior to insertion; the store assigns the ID.
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub title: String,
    pub description: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub image: String,
    pub creator: Uuid,
}
