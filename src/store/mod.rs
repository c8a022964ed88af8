//! Entity store abstraction over the `users` and `places` collections.
//!
//! The two cross-entity critical sections — creating and deleting a place
//! together with the owning user's `places` list — are exposed as single
//! atomic operations. The Postgres implementation opens one transaction
//! before the first write and commits after the last, so either both
//! entities change or neither does.

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::models::{NewPlace, NewUser, Place, User};

pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("unique constraint violated on {field}")]
    UniqueViolation { field: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait EntityStore: Send + Sync {
    // --- users ---

    /// Insert a new user with an empty `places` list. The store is the
    /// authoritative guard for username/email uniqueness.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    // --- places ---

    async fn find_place_by_id(&self, id: Uuid) -> Result<Option<Place>, StoreError>;

    /// Joined lookup of a place and its owning user.
    async fn find_place_with_owner(&self, id: Uuid) -> Result<Option<(Place, User)>, StoreError>;

    async fn list_places(&self) -> Result<Vec<Place>, StoreError>;

    async fn list_places_by_creator(&self, creator: Uuid) -> Result<Vec<Place>, StoreError>;

    /// Persist field changes to an existing place.
    async fn update_place(&self, place: &Place) -> Result<(), StoreError>;

    // --- atomic two-entity operations ---

    /// Insert the place and append its ID to the creator's `places`,
    /// all-or-nothing. Fails with `NotFound` if the creator row vanished.
    async fn create_place_owned(&self, place: NewPlace) -> Result<Place, StoreError>;

    /// Delete the place and remove its ID from the owner's `places`,
    /// all-or-nothing.
    async fn delete_place_owned(&self, place_id: Uuid, creator: Uuid) -> Result<(), StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
