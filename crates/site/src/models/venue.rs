//! Venue record types.

use encore_core::{GenreList, VenueId};

/// A venue row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Venue {
    /// Storage-assigned identity, immutable after creation.
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    /// Genres in their delimited storage form.
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    /// Whether the venue is looking to book artists.
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl Venue {
    /// The genre tags as a list.
    #[must_use]
    pub fn genre_tags(&self) -> GenreList {
        GenreList::from_stored(&self.genres)
    }
}

/// Fields for creating or updating a venue.
///
/// Identity is assigned by the storage layer on insert.
#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: GenreList,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}
