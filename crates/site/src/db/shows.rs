//! Show repository for database operations.

use sqlx::PgPool;

use encore_core::{ArtistId, ShowId, VenueId};

use super::RepositoryError;
use crate::models::{NewShow, ShowListing, ShowWithArtist, ShowWithVenue};

/// Repository for show database operations.
pub struct ShowRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepository<'a> {
    /// Create a new show repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every show joined to both parents, in storage iteration order.
    ///
    /// This is a full scan on every request; fine at listing-site scale,
    /// a known limitation beyond it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all_with_parents(&self) -> Result<Vec<ShowListing>, RepositoryError> {
        let shows = sqlx::query_as::<_, ShowListing>(
            r"
            SELECT s.venue_id, v.name AS venue_name,
                   s.artist_id, a.name AS artist_name,
                   a.image_link AS artist_image_link,
                   s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(shows)
    }

    /// Shows at one venue, joined to the booked artist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_venue(&self, venue_id: VenueId) -> Result<Vec<ShowWithArtist>, RepositoryError> {
        let shows = sqlx::query_as::<_, ShowWithArtist>(
            r"
            SELECT s.artist_id, a.name AS artist_name,
                   a.image_link AS artist_image_link,
                   s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.id
            ",
        )
        .bind(venue_id)
        .fetch_all(self.pool)
        .await?;

        Ok(shows)
    }

    /// Shows by one artist, joined to the hosting venue.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_artist(
        &self,
        artist_id: ArtistId,
    ) -> Result<Vec<ShowWithVenue>, RepositoryError> {
        let shows = sqlx::query_as::<_, ShowWithVenue>(
            r"
            SELECT s.venue_id, v.name AS venue_name,
                   v.image_link AS venue_image_link,
                   s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.id
            ",
        )
        .bind(artist_id)
        .fetch_all(self.pool)
        .await?;

        Ok(shows)
    }

    /// Create a show, returning the storage-assigned id.
    ///
    /// Both referenced rows are checked inside the insert transaction so a
    /// dangling id surfaces as [`RepositoryError::MissingReference`] instead
    /// of a foreign-key violation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the venue or artist
    /// does not exist; `RepositoryError::Database` for other failures. The
    /// transaction is rolled back on every failure path.
    pub async fn create(&self, show: &NewShow) -> Result<ShowId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let venue_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM venues WHERE id = $1)")
                .bind(show.venue_id)
                .fetch_one(&mut *tx)
                .await?;
        if !venue_exists {
            return Err(RepositoryError::MissingReference("venue"));
        }

        let artist_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM artists WHERE id = $1)")
                .bind(show.artist_id)
                .fetch_one(&mut *tx)
                .await?;
        if !artist_exists {
            return Err(RepositoryError::MissingReference("artist"));
        }

        let id = sqlx::query_scalar::<_, ShowId>(
            r"
            INSERT INTO shows (venue_id, artist_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(show.start_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }
}
