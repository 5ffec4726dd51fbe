//! Artist repository for database operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use encore_core::ArtistId;

use super::{RepositoryError, escape_like};
use crate::models::{Artist, NewArtist};

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, genres, \
     image_link, facebook_link, website_link, seeking_venue, seeking_description";

/// Repository for artist database operations.
pub struct ArtistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepository<'a> {
    /// Create a new artist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All artists in storage iteration order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<Vec<Artist>, RepositoryError> {
        let artists = sqlx::query_as::<_, Artist>(&format!(
            "SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(artists)
    }

    /// Get an artist by id, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ArtistId) -> Result<Option<Artist>, RepositoryError> {
        let artist = sqlx::query_as::<_, Artist>(&format!(
            "SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(artist)
    }

    /// Case-insensitive substring search on the artist name.
    ///
    /// The empty term matches every artist. Wildcards in the term are
    /// escaped so it is matched literally.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, term: &str) -> Result<Vec<Artist>, RepositoryError> {
        let pattern = format!("%{}%", escape_like(term));
        let artists = sqlx::query_as::<_, Artist>(&format!(
            r"SELECT {ARTIST_COLUMNS} FROM artists WHERE name ILIKE $1 ESCAPE '\' ORDER BY id"
        ))
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(artists)
    }

    /// Count upcoming shows per artist, keyed by artist id.
    ///
    /// "Upcoming" means `start_time` strictly after the supplied `now`.
    /// Artists with no upcoming shows are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upcoming_show_counts(
        &self,
        now: DateTime<Utc>,
    ) -> Result<HashMap<ArtistId, i64>, RepositoryError> {
        let rows = sqlx::query_as::<_, (ArtistId, i64)>(
            "SELECT artist_id, COUNT(*) FROM shows WHERE start_time > $1 GROUP BY artist_id",
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Create an artist, returning the storage-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails; the
    /// transaction is rolled back on every failure path.
    pub async fn create(&self, artist: &NewArtist) -> Result<ArtistId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, ArtistId>(
            r"
            INSERT INTO artists (
                name, city, state, phone, genres,
                image_link, facebook_link, website_link,
                seeking_venue, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            ",
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(artist.genres.to_stored())
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }

    /// Update an artist in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no artist has the given id;
    /// `RepositoryError::Database` for other failures. The transaction is
    /// rolled back on every failure path.
    pub async fn update(&self, id: ArtistId, artist: &NewArtist) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE artists
            SET name = $2, city = $3, state = $4, phone = $5, genres = $6,
                image_link = $7, facebook_link = $8, website_link = $9,
                seeking_venue = $10, seeking_description = $11
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(artist.genres.to_stored())
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}
