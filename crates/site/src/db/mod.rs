//! Database operations for the encore `PostgreSQL` store.
//!
//! # Tables
//!
//! - `venues` - Places that host shows
//! - `artists` - Performers that get booked
//! - `shows` - Bookings; each row references exactly one venue and one artist
//!
//! Each entity has a repository module. Repositories borrow the pool; every
//! connection or transaction they acquire is scoped to a single call and
//! released on all exit paths (commit on success, rollback on drop).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/site/migrations/` and run via:
//! ```bash
//! cargo run -p encore-cli -- migrate
//! ```
//! They are never run automatically at startup.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod artists;
pub mod shows;
pub mod venues;

pub use artists::ArtistRepository;
pub use shows::ShowRepository;
pub use venues::VenueRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// A submitted foreign key references a row that does not exist.
    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Escape `LIKE`/`ILIKE` metacharacters so a search term is matched as a
/// literal substring.
#[must_use]
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_passes_plain_terms_through() {
        assert_eq!(escape_like("hop"), "hop");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
