//! Venue repository for database operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use encore_core::VenueId;

use super::{RepositoryError, escape_like};
use crate::models::{NewVenue, Venue};

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, genres, \
     image_link, facebook_link, website_link, seeking_talent, seeking_description";

/// Repository for venue database operations.
pub struct VenueRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepository<'a> {
    /// Create a new venue repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All venues in storage iteration order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<Vec<Venue>, RepositoryError> {
        let venues = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(venues)
    }

    /// Get a venue by id, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: VenueId) -> Result<Option<Venue>, RepositoryError> {
        let venue = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(venue)
    }

    /// Case-insensitive substring search on the venue name.
    ///
    /// The empty term matches every venue. Wildcards in the term are escaped
    /// so it is matched literally.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, term: &str) -> Result<Vec<Venue>, RepositoryError> {
        let pattern = format!("%{}%", escape_like(term));
        let venues = sqlx::query_as::<_, Venue>(&format!(
            r"SELECT {VENUE_COLUMNS} FROM venues WHERE name ILIKE $1 ESCAPE '\' ORDER BY id"
        ))
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(venues)
    }

    /// Count upcoming shows per venue, keyed by venue id.
    ///
    /// "Upcoming" means `start_time` strictly after the supplied `now`.
    /// Venues with no upcoming shows are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upcoming_show_counts(
        &self,
        now: DateTime<Utc>,
    ) -> Result<HashMap<VenueId, i64>, RepositoryError> {
        let rows = sqlx::query_as::<_, (VenueId, i64)>(
            "SELECT venue_id, COUNT(*) FROM shows WHERE start_time > $1 GROUP BY venue_id",
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Create a venue, returning the storage-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails; the
    /// transaction is rolled back on every failure path.
    pub async fn create(&self, venue: &NewVenue) -> Result<VenueId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, VenueId>(
            r"
            INSERT INTO venues (
                name, city, state, address, phone, genres,
                image_link, facebook_link, website_link,
                seeking_talent, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            ",
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(venue.genres.to_stored())
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }

    /// Update a venue in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no venue has the given id;
    /// `RepositoryError::Database` for other failures. The transaction is
    /// rolled back on every failure path.
    pub async fn update(&self, id: VenueId, venue: &NewVenue) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE venues
            SET name = $2, city = $3, state = $4, address = $5, phone = $6,
                genres = $7, image_link = $8, facebook_link = $9,
                website_link = $10, seeking_talent = $11, seeking_description = $12
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(venue.genres.to_stored())
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    /// Delete a venue and all shows that reference it, atomically.
    ///
    /// The schema does not cascade, so the dependent shows are deleted
    /// explicitly inside the same transaction; a failure in either step
    /// rolls back both.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no venue has the given id;
    /// `RepositoryError::Database` for other failures.
    pub async fn delete(&self, id: VenueId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM shows WHERE venue_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}
