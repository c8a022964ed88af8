use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account. `places` holds the IDs of every place the user
/// owns, kept in sync with `Place.creator` by the place mutation protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Stored argon2 hash; never serialized into responses.
    #[serde(skip_serializing)]
    pub password: String,
    pub image: Option<String>,
    pub places: Vec<Uuid>,
}

/// Registration input, password already hashed. The store assigns the ID
/// and starts `places` empty.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
}
