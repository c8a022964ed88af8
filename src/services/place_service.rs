//! Place mutations and reads.
//!
//! Create and delete are the only operations touching both a `Place` and
//! its owning `User`; both go through the store's atomic two-entity
//! operations so the bidirectional reference never half-commits.

use uuid::Uuid;

use crate::database::models::{NewPlace, Place};
use crate::error::ApiError;
use crate::services::file_storage::FileStorage;
use crate::services::geocoding::Geocoder;
use crate::store::{EntityStore, StoreError};

#[derive(Debug, Clone)]
pub struct PlaceInput {
    pub title: String,
    pub description: String,
    pub address: String,
    pub image: String,
}

#[derive(Debug, Clone)]
pub struct PlaceUpdate {
    pub title: String,
    pub description: String,
    pub address: String,
}

/// Create a place owned by the authenticated principal.
///
/// The principal comes from a verified token, but the account may have
/// been deleted since issuance — creation re-validates existence. Other
/// authenticated routes deliberately do not.
pub async fn create_place(
    store: &dyn EntityStore,
    geocoder: &dyn Geocoder,
    input: PlaceInput,
    principal: Uuid,
) -> Result<Place, ApiError> {
    let coordinates = geocoder.resolve(&input.address).await?;

    let user = store
        .find_user_by_id(principal)
        .await
        .map_err(|e| {
            tracing::error!("creator lookup failed: {}", e);
            ApiError::internal("Could not create a new place, please try again.")
        })?
        .ok_or_else(|| ApiError::not_found("Could not find a user for the provided ID."))?;

    store
        .create_place_owned(NewPlace {
            title: input.title,
            description: input.description,
            address: input.address,
            coordinates,
            image: input.image,
            creator: user.id,
        })
        .await
        .map_err(|e| {
            tracing::error!("creating place failed: {}", e);
            ApiError::internal("Creating a new place failed, please try again.")
        })
}

/// Update title/description/address (and derived coordinates) of a place
/// owned by the principal.
pub async fn update_place(
    store: &dyn EntityStore,
    geocoder: &dyn Geocoder,
    place_id: Uuid,
    update: PlaceUpdate,
    principal: Uuid,
) -> Result<Place, ApiError> {
    let coordinates = geocoder.resolve(&update.address).await?;

    let mut place = store
        .find_place_by_id(place_id)
        .await
        .map_err(|e| {
            tracing::error!("place lookup failed: {}", e);
            ApiError::internal("Something went wrong, could not update a place.")
        })?
        .ok_or_else(|| ApiError::not_found("There is no place with the provided ID."))?;

    if place.creator != principal {
        return Err(ApiError::authorization(
            "You do not have permissions to edit this place.",
        ));
    }

    place.title = update.title;
    place.description = update.description;
    place.address = update.address;
    place.coordinates = coordinates;

    store.update_place(&place).await.map_err(|e| {
        tracing::error!("updating place failed: {}", e);
        ApiError::internal("Something went wrong, could not update a place.")
    })?;

    Ok(place)
}

/// Delete a place owned by the principal, removing it from the owner's
/// `places` list in the same transaction. The stored image is removed
/// best-effort after commit and never affects the outcome.
pub async fn delete_place(
    store: &dyn EntityStore,
    files: &FileStorage,
    place_id: Uuid,
    principal: Uuid,
) -> Result<(), ApiError> {
    let (place, owner) = store
        .find_place_with_owner(place_id)
        .await
        .map_err(|e| {
            tracing::error!("place lookup failed: {}", e);
            ApiError::internal("Something went wrong, could not delete a place.")
        })?
        .ok_or_else(|| ApiError::not_found("Could not find a place with this ID."))?;

    if owner.id != principal {
        return Err(ApiError::authorization(
            "You do not have permissions to delete this place.",
        ));
    }

    store
        .delete_place_owned(place.id, owner.id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound(_) => {
                ApiError::not_found("Could not find a place with this ID.")
            }
            other => {
                tracing::error!("deleting place failed: {}", other);
                ApiError::internal("Something went wrong, could not delete a place.")
            }
        })?;

    // Record delete is committed; the file is cleanup only.
    files.remove(&place.image);
    Ok(())
}

pub async fn get_all_places(store: &dyn EntityStore) -> Result<Vec<Place>, ApiError> {
    store.list_places().await.map_err(|e| {
        tracing::error!("listing places failed: {}", e);
        ApiError::internal("Something went wrong, could not find places.")
    })
}

pub async fn get_place_by_id(store: &dyn EntityStore, place_id: Uuid) -> Result<Place, ApiError> {
    store
        .find_place_by_id(place_id)
        .await
        .map_err(|e| {
            tracing::error!("place lookup failed: {}", e);
            ApiError::internal("Something went wrong, could not find a place.")
        })?
        .ok_or_else(|| ApiError::not_found("There is no place with the provided ID."))
}

/// Places created by one user. An empty list is a normal response.
pub async fn get_places_by_user(
    store: &dyn EntityStore,
    user_id: Uuid,
) -> Result<Vec<Place>, ApiError> {
    store.list_places_by_creator(user_id).await.map_err(|e| {
        tracing::error!("listing places failed: {}", e);
        ApiError::internal("Something went wrong, could not find places")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Coordinates;
    use crate::testing::{FailingGeocoder, MemoryStore, StaticGeocoder};

    fn input(title: &str) -> PlaceInput {
        PlaceInput {
            title: title.into(),
            description: "a place worth keeping".into(),
            address: "20 W 34th St, New York".into(),
            image: "uploads/p1.png".into(),
        }
    }

    fn storage() -> FileStorage {
        FileStorage::new(std::env::temp_dir())
    }

    #[tokio::test]
    async fn created_place_lands_in_owner_list() {
        let store = MemoryStore::new();
        let geocoder = StaticGeocoder::at(40.748, -73.985);
        let alice = store.seed_user("alice", "a@x.com");

        let place = create_place(&store, &geocoder, input("Empire State"), alice.id)
            .await
            .unwrap();

        assert_eq!(place.creator, alice.id);
        assert_eq!(place.coordinates, Coordinates { lat: 40.748, lng: -73.985 });

        let owner = store.find_user_by_id(alice.id).await.unwrap().unwrap();
        assert_eq!(owner.places, vec![place.id]);
    }

    #[tokio::test]
    async fn create_for_vanished_user_is_404() {
        let store = MemoryStore::new();
        let geocoder = StaticGeocoder::at(1.0, 2.0);

        let err = create_place(&store, &geocoder, input("Ghost"), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(store.list_places().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_second_write_commits_nothing() {
        let store = MemoryStore::new();
        let geocoder = StaticGeocoder::at(1.0, 2.0);
        let alice = store.seed_user("alice", "a@x.com");

        store.fail_next_owner_write();
        let err = create_place(&store, &geocoder, input("Doomed"), alice.id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);

        // Neither an orphan place nor a dangling listing.
        assert!(store.list_places().await.unwrap().is_empty());
        let owner = store.find_user_by_id(alice.id).await.unwrap().unwrap();
        assert!(owner.places.is_empty());
    }

    #[tokio::test]
    async fn geocoding_failure_mutates_nothing() {
        let store = MemoryStore::new();
        let alice = store.seed_user("alice", "a@x.com");

        let err = create_place(&store, &FailingGeocoder, input("Nowhere"), alice.id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 422);

        assert!(store.list_places().await.unwrap().is_empty());
        let owner = store.find_user_by_id(alice.id).await.unwrap().unwrap();
        assert!(owner.places.is_empty());
    }

    #[tokio::test]
    async fn update_applies_fields_and_fresh_coordinates() {
        let store = MemoryStore::new();
        let alice = store.seed_user("alice", "a@x.com");
        let place = create_place(&store, &StaticGeocoder::at(1.0, 2.0), input("Old"), alice.id)
            .await
            .unwrap();

        let updated = update_place(
            &store,
            &StaticGeocoder::at(3.0, 4.0),
            place.id,
            PlaceUpdate {
                title: "New".into(),
                description: "still worth keeping".into(),
                address: "somewhere else".into(),
            },
            alice.id,
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.coordinates, Coordinates { lat: 3.0, lng: 4.0 });

        let stored = store.find_place_by_id(place.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "New");
        assert_eq!(stored.address, "somewhere else");
    }

    #[tokio::test]
    async fn update_of_unknown_place_is_404() {
        let store = MemoryStore::new();
        let err = update_place(
            &store,
            &StaticGeocoder::at(1.0, 2.0),
            Uuid::new_v4(),
            PlaceUpdate {
                title: "x".into(),
                description: "yyyyy".into(),
                address: "z".into(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn update_by_non_owner_is_401_and_leaves_place_unchanged() {
        let store = MemoryStore::new();
        let alice = store.seed_user("alice", "a@x.com");
        let bob = store.seed_user("bob", "b@x.com");
        let place = create_place(&store, &StaticGeocoder::at(1.0, 2.0), input("Mine"), alice.id)
            .await
            .unwrap();

        let err = update_place(
            &store,
            &StaticGeocoder::at(9.0, 9.0),
            place.id,
            PlaceUpdate {
                title: "Stolen".into(),
                description: "not yours".into(),
                address: "elsewhere".into(),
            },
            bob.id,
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), 401);

        let stored = store.find_place_by_id(place.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Mine");
        assert_eq!(stored.coordinates, Coordinates { lat: 1.0, lng: 2.0 });
    }

    #[tokio::test]
    async fn delete_removes_place_and_owner_listing_once() {
        let store = MemoryStore::new();
        let alice = store.seed_user("alice", "a@x.com");
        let keep = create_place(&store, &StaticGeocoder::at(1.0, 2.0), input("Keep"), alice.id)
            .await
            .unwrap();
        let gone = create_place(&store, &StaticGeocoder::at(1.0, 2.0), input("Gone"), alice.id)
            .await
            .unwrap();

        delete_place(&store, &storage(), gone.id, alice.id).await.unwrap();

        assert!(store.find_place_by_id(gone.id).await.unwrap().is_none());
        let owner = store.find_user_by_id(alice.id).await.unwrap().unwrap();
        assert_eq!(owner.places, vec![keep.id]);

        // Second delete of the same ID is a 404, not a second removal.
        let err = delete_place(&store, &storage(), gone.id, alice.id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn delete_of_unknown_place_is_404() {
        let store = MemoryStore::new();
        let err = delete_place(&store, &storage(), Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn delete_by_non_owner_leaves_everything_intact() {
        let store = MemoryStore::new();
        let alice = store.seed_user("alice", "a@x.com");
        let bob = store.seed_user("bob", "b@x.com");
        let p1 = create_place(&store, &StaticGeocoder::at(1.0, 2.0), input("P1"), alice.id)
            .await
            .unwrap();

        let err = delete_place(&store, &storage(), p1.id, bob.id).await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        assert!(store.find_place_by_id(p1.id).await.unwrap().is_some());
        let owner = store.find_user_by_id(alice.id).await.unwrap().unwrap();
        assert_eq!(owner.places, vec![p1.id]);
    }

    #[tokio::test]
    async fn reads_return_empty_collections_not_errors() {
        let store = MemoryStore::new();
        assert!(get_all_places(&store).await.unwrap().is_empty());
        assert!(get_places_by_user(&store, Uuid::new_v4()).await.unwrap().is_empty());

        let err = get_place_by_id(&store, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn listing_by_user_returns_only_their_places() {
        let store = MemoryStore::new();
        let alice = store.seed_user("alice", "a@x.com");
        let bob = store.seed_user("bob", "b@x.com");
        let geocoder = StaticGeocoder::at(1.0, 2.0);

        let a1 = create_place(&store, &geocoder, input("A1"), alice.id).await.unwrap();
        create_place(&store, &geocoder, input("B1"), bob.id).await.unwrap();

        let mine = get_places_by_user(&store, alice.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, a1.id);

        assert_eq!(get_all_places(&store).await.unwrap().len(), 2);
    }
}
