//! Artist record types.

use encore_core::{ArtistId, GenreList};

/// An artist row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Artist {
    /// Storage-assigned identity, immutable after creation.
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    /// Genres in their delimited storage form.
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    /// Whether the artist is looking for venues to play.
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl Artist {
    /// The genre tags as a list.
    #[must_use]
    pub fn genre_tags(&self) -> GenreList {
        GenreList::from_stored(&self.genres)
    }
}

/// Fields for creating or updating an artist.
#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: GenreList,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}
