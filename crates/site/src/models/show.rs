//! Show record types.
//!
//! A show is the join entity of a booking: it belongs to exactly one venue
//! and one artist, and both foreign keys are required. The joined row types
//! below mirror the shapes the listing and detail pages consume.

use chrono::{DateTime, Utc};
use encore_core::{ArtistId, VenueId};

/// Fields for creating a show.
#[derive(Debug, Clone, Copy)]
pub struct NewShow {
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: DateTime<Utc>,
}

/// A show joined to its artist, as shown on a venue detail page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShowWithArtist {
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show joined to its venue, as shown on an artist detail page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShowWithVenue {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show joined to both parents, flattened for the shows listing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShowListing {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}
