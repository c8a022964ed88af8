//! In-memory test doubles for the store and the geocoder.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::models::{Coordinates, NewPlace, NewUser, Place, User};
use crate::services::geocoding::{GeocodeError, Geocoder};
use crate::store::{EntityStore, StoreError};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    places: Vec<Place>,
}

/// Store double holding everything behind one mutex, with switches for
/// simulating the failure modes a live database can produce.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    blind_precheck: AtomicBool,
    fail_owner_write: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, bypassing registration.
    pub fn seed_user(&self, username: &str, email: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password: "$argon2id$seeded".to_string(),
            image: None,
            places: Vec::new(),
        };
        self.inner.lock().unwrap().users.push(user.clone());
        user
    }

    /// Make the email/username lookups miss until the next insert, so a
    /// uniqueness pre-check passes and the insert itself hits the
    /// constraint, as happens when two registrations race.
    pub fn skip_unique_precheck_once(&self) {
        self.blind_precheck.store(true, Ordering::SeqCst);
    }

    /// Fail the next owner-list write inside `create_place_owned`,
    /// standing in for a transaction aborted between its two statements.
    pub fn fail_next_owner_write(&self) {
        self.fail_owner_write.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.blind_precheck.store(false, Ordering::SeqCst);

        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation { field: "email".to_string() });
        }
        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation { field: "username".to_string() });
        }

        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password: user.password,
            image: user.image,
            places: Vec::new(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        if self.blind_precheck.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        if self.blind_precheck.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.lock().unwrap().users.clone())
    }

    async fn find_place_by_id(&self, id: Uuid) -> Result<Option<Place>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.places.iter().find(|p| p.id == id).cloned())
    }

    async fn find_place_with_owner(&self, id: Uuid) -> Result<Option<(Place, User)>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let Some(place) = inner.places.iter().find(|p| p.id == id).cloned() else {
            return Ok(None);
        };
        let owner = inner
            .users
            .iter()
            .find(|u| u.id == place.creator)
            .cloned()
            .ok_or(StoreError::NotFound("user"))?;
        Ok(Some((place, owner)))
    }

    async fn list_places(&self) -> Result<Vec<Place>, StoreError> {
        Ok(self.inner.lock().unwrap().places.clone())
    }

    async fn list_places_by_creator(&self, creator: Uuid) -> Result<Vec<Place>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.places.iter().filter(|p| p.creator == creator).cloned().collect())
    }

    async fn update_place(&self, place: &Place) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let stored = inner
            .places
            .iter_mut()
            .find(|p| p.id == place.id)
            .ok_or(StoreError::NotFound("place"))?;
        *stored = place.clone();
        Ok(())
    }

    async fn create_place_owned(&self, place: NewPlace) -> Result<Place, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        let creator_exists = inner.users.iter().any(|u| u.id == place.creator);
        if !creator_exists {
            return Err(StoreError::NotFound("user"));
        }
        if self.fail_owner_write.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }

        let place = Place {
            id: Uuid::new_v4(),
            title: place.title,
            description: place.description,
            address: place.address,
            coordinates: place.coordinates,
            image: place.image,
            creator: place.creator,
        };
        inner.places.push(place.clone());
        let owner = inner.users.iter_mut().find(|u| u.id == place.creator).unwrap();
        owner.places.push(place.id);
        Ok(place)
    }

    async fn delete_place_owned(&self, place_id: Uuid, creator: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.places.len();
        inner.places.retain(|p| p.id != place_id);
        if inner.places.len() == before {
            return Err(StoreError::NotFound("place"));
        }
        if let Some(owner) = inner.users.iter_mut().find(|u| u.id == creator) {
            owner.places.retain(|id| *id != place_id);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Geocoder returning fixed coordinates for any address.
pub struct StaticGeocoder {
    coordinates: Coordinates,
}

impl StaticGeocoder {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self { coordinates: Coordinates { lat, lng } }
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn resolve(&self, _address: &str) -> Result<Coordinates, GeocodeError> {
        Ok(self.coordinates)
    }
}

/// Geocoder that recognizes no address at all.
pub struct FailingGeocoder;

#[async_trait]
impl Geocoder for FailingGeocoder {
    async fn resolve(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        Err(GeocodeError::NotFound(address.to_string()))
    }
}
