//! Postgres-backed entity store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Coordinates, NewPlace, NewUser, Place, User};

use super::{EntityStore, StoreError};

type UserRow = (Uuid, String, String, String, Option<String>, Vec<Uuid>);
type PlaceRow = (Uuid, String, String, String, f64, f64, String, Uuid);

const USER_COLUMNS: &str = "id, username, email, password, image, places";
const PLACE_COLUMNS: &str = "id, title, description, address, lat, lng, image, creator";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row((id, username, email, password, image, places): UserRow) -> User {
    User { id, username, email, password, image, places }
}

fn place_from_row((id, title, description, address, lat, lng, image, creator): PlaceRow) -> Place {
    Place {
        id,
        title,
        description,
        address,
        coordinates: Coordinates { lat, lng },
        image,
        creator,
    }
}

/// Map a unique-index violation back to the logical field it guards.
fn field_for_constraint(constraint: &str) -> &'static str {
    match constraint {
        "users_email_key" => "email",
        "users_username_key" => "username",
        _ => "record",
    }
}

fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = db_err
                .constraint()
                .map_or("record", field_for_constraint)
                .to_string();
            return StoreError::UniqueViolation { field };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl EntityStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (id, username, email, password, image, places)
             VALUES ($1, $2, $3, $4, $5, '{}')",
        )
        .bind(id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.image)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(User {
            id,
            username: user.username,
            email: user.email,
            password: user.password,
            image: user.image,
            places: Vec::new(),
        })
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(user_from_row))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(user_from_row))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(user_from_row))
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(user_from_row).collect())
    }

    async fn find_place_by_id(&self, id: Uuid) -> Result<Option<Place>, StoreError> {
        let row = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(place_from_row))
    }

    async fn find_place_with_owner(&self, id: Uuid) -> Result<Option<(Place, User)>, StoreError> {
        let row = sqlx::query_as::<
            _,
            (
                Uuid,
                String,
                String,
                String,
                f64,
                f64,
                String,
                Uuid,
                String,
                String,
                String,
                Option<String>,
                Vec<Uuid>,
            ),
        >(
            "SELECT p.id, p.title, p.description, p.address, p.lat, p.lng, p.image, p.creator,
                    u.username, u.email, u.password, u.image, u.places
             FROM places p
             JOIN users u ON u.id = p.creator
             WHERE p.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(
            |(
                place_id,
                title,
                description,
                address,
                lat,
                lng,
                image,
                creator,
                username,
                email,
                password,
                user_image,
                places,
            )| {
                (
                    place_from_row((place_id, title, description, address, lat, lng, image, creator)),
                    user_from_row((creator, username, email, password, user_image, places)),
                )
            },
        ))
    }

    async fn list_places(&self) -> Result<Vec<Place>, StoreError> {
        let rows = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places ORDER BY title ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(place_from_row).collect())
    }

    async fn list_places_by_creator(&self, creator: Uuid) -> Result<Vec<Place>, StoreError> {
        let rows = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places WHERE creator = $1 ORDER BY title ASC"
        ))
        .bind(creator)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(place_from_row).collect())
    }

    async fn update_place(&self, place: &Place) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE places
             SET title = $2, description = $3, address = $4, lat = $5, lng = $6
             WHERE id = $1",
        )
        .bind(place.id)
        .bind(&place.title)
        .bind(&place.description)
        .bind(&place.address)
        .bind(place.coordinates.lat)
        .bind(place.coordinates.lng)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("place"));
        }
        Ok(())
    }

    async fn create_place_owned(&self, place: NewPlace) -> Result<Place, StoreError> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO places (id, title, description, address, lat, lng, image, creator)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(id)
        .bind(&place.title)
        .bind(&place.description)
        .bind(&place.address)
        .bind(place.coordinates.lat)
        .bind(place.coordinates.lng)
        .bind(&place.image)
        .bind(place.creator)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        let updated = sqlx::query("UPDATE users SET places = array_append(places, $2) WHERE id = $1")
            .bind(place.creator)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Dropping the transaction without commit rolls the insert back.
        if updated.rows_affected() == 0 {
            return Err(StoreError::NotFound("user"));
        }

        tx.commit().await?;

        Ok(Place {
            id,
            title: place.title,
            description: place.description,
            address: place.address,
            coordinates: place.coordinates,
            image: place.image,
            creator: place.creator,
        })
    }

    async fn delete_place_owned(&self, place_id: Uuid, creator: Uuid) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(place_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(StoreError::NotFound("place"));
        }

        sqlx::query("UPDATE users SET places = array_remove(places, $2) WHERE id = $1")
            .bind(creator)
            .bind(place_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
