//! Form decoding and validation.
//!
//! Submissions arrive urlencoded; the `genres` field is multi-valued, which
//! the typed `Form` extractor cannot express, so the handlers hand the raw
//! body to [`FormData`] and pull named fields out of it. Validation happens
//! here, before anything touches the database: required fields must be
//! present and non-empty, genre tags must survive the delimited round-trip,
//! and ids and timestamps must parse.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use encore_core::{ArtistId, GenreError, GenreList, VenueId};

use crate::models::{NewArtist, NewShow, NewVenue};

/// Genre options offered by the venue and artist forms.
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Timestamp formats accepted from the show form: the plain form and what a
/// `datetime-local` input submits.
const START_TIME_INPUT_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Error decoding or validating a submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A genre tag would not survive the delimited round-trip.
    #[error(transparent)]
    Genre(#[from] GenreError),

    /// An id field is not a whole number.
    #[error("{0} must be a whole number")]
    InvalidId(&'static str),

    /// The start time does not parse under any accepted format.
    #[error("start_time is not a recognized timestamp")]
    InvalidStartTime,
}

/// A parsed urlencoded submission, preserving repeated fields.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    /// Parse an urlencoded request body.
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        Self {
            fields: url::form_urlencoded::parse(body)
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
                .collect(),
        }
    }

    /// The first value submitted under `name`, if any.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted under `name`, in submission order.
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

/// Coerce a checkbox-style field to a boolean.
///
/// The truthy marker set is `{"y", "t"}`, applied uniformly to both the
/// venue and artist seeking flags. Anything else, including an absent
/// field, is false.
#[must_use]
pub fn checkbox(value: Option<&str>) -> bool {
    matches!(value, Some("y" | "t"))
}

/// A required field: present and non-blank, trimmed.
fn required(form: &FormData, name: &'static str) -> Result<String, FormError> {
    form.first(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .ok_or(FormError::MissingField(name))
}

/// An optional field: trimmed, with blank collapsing to `None`.
fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn id_field(form: &FormData, name: &'static str) -> Result<i32, FormError> {
    required(form, name)?
        .parse::<i32>()
        .map_err(|_| FormError::InvalidId(name))
}

/// Parse a submitted start time, accepting each supported input format.
fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, FormError> {
    let raw = raw.trim();
    for format in START_TIME_INPUT_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(FormError::InvalidStartTime)
}

/// Decode and validate a venue submission.
///
/// # Errors
///
/// Returns a [`FormError`] naming the first failed field.
pub fn venue_from_form(form: &FormData) -> Result<NewVenue, FormError> {
    Ok(NewVenue {
        name: required(form, "name")?,
        city: required(form, "city")?,
        state: required(form, "state")?,
        address: required(form, "address")?,
        phone: optional(form.first("phone")),
        genres: GenreList::from_tags(form.all("genres"))?,
        image_link: optional(form.first("image_link")),
        facebook_link: optional(form.first("facebook_link")),
        website_link: optional(form.first("website_link")),
        seeking_talent: checkbox(form.first("seeking_talent")),
        seeking_description: optional(form.first("seeking_description")),
    })
}

/// Decode and validate an artist submission.
///
/// # Errors
///
/// Returns a [`FormError`] naming the first failed field.
pub fn artist_from_form(form: &FormData) -> Result<NewArtist, FormError> {
    Ok(NewArtist {
        name: required(form, "name")?,
        city: required(form, "city")?,
        state: required(form, "state")?,
        phone: optional(form.first("phone")),
        genres: GenreList::from_tags(form.all("genres"))?,
        image_link: optional(form.first("image_link")),
        facebook_link: optional(form.first("facebook_link")),
        website_link: optional(form.first("website_link")),
        seeking_venue: checkbox(form.first("seeking_venue")),
        seeking_description: optional(form.first("seeking_description")),
    })
}

/// Decode and validate a show submission.
///
/// # Errors
///
/// Returns a [`FormError`] naming the first failed field.
pub fn show_from_form(form: &FormData) -> Result<NewShow, FormError> {
    let artist_id = ArtistId::new(id_field(form, "artist_id")?);
    let venue_id = VenueId::new(id_field(form, "venue_id")?);
    let start_time = parse_start_time(&required(form, "start_time")?)?;

    Ok(NewShow {
        venue_id,
        artist_id,
        start_time,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(body: &str) -> FormData {
        FormData::parse(body.as_bytes())
    }

    #[test]
    fn checkbox_accepts_the_truthy_markers() {
        assert!(checkbox(Some("y")));
        assert!(checkbox(Some("t")));
        assert!(!checkbox(Some("yes")));
        assert!(!checkbox(Some("")));
        assert!(!checkbox(None));
    }

    #[test]
    fn form_data_preserves_repeated_fields() {
        let data = form("genres=Jazz&genres=Reggae&name=The+Musical+Hop");
        assert_eq!(data.all("genres"), ["Jazz", "Reggae"]);
        assert_eq!(data.first("name"), Some("The Musical Hop"));
    }

    #[test]
    fn venue_submission_decodes() {
        let data = form(
            "name=The+Musical+Hop&city=San+Francisco&state=CA\
             &address=1015+Folsom+Street&phone=123-123-1234+\
             &genres=Jazz&genres=Reggae&seeking_talent=t\
             &seeking_description=Looking+for+local+artists",
        );
        let venue = venue_from_form(&data).unwrap();

        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.phone.as_deref(), Some("123-123-1234"));
        assert_eq!(venue.genres.to_stored(), "Jazz,Reggae");
        assert!(venue.seeking_talent);
        assert_eq!(venue.image_link, None);
    }

    #[test]
    fn venue_requires_name_and_location() {
        let data = form("city=Austin&state=TX&address=123");
        assert_eq!(
            venue_from_form(&data).unwrap_err(),
            FormError::MissingField("name")
        );

        let data = form("name=X&state=TX&address=123");
        assert_eq!(
            venue_from_form(&data).unwrap_err(),
            FormError::MissingField("city")
        );
    }

    #[test]
    fn blank_required_field_is_missing() {
        let data = form("name=++&city=Austin&state=TX&address=123");
        assert_eq!(
            venue_from_form(&data).unwrap_err(),
            FormError::MissingField("name")
        );
    }

    #[test]
    fn artist_omitted_seeking_flag_is_false() {
        let data = form("name=Guns+N+Petals&city=San+Francisco&state=CA");
        let artist = artist_from_form(&data).unwrap();
        assert!(!artist.seeking_venue);
        assert!(artist.genres.is_empty());
    }

    #[test]
    fn genre_with_delimiter_is_rejected() {
        let data = form("name=X&city=Y&state=Z&address=W&genres=Rock%2CRoll");
        assert!(matches!(
            venue_from_form(&data).unwrap_err(),
            FormError::Genre(GenreError::DelimiterInTag(_))
        ));
    }

    #[test]
    fn show_submission_decodes_each_time_format() {
        for start in [
            "2035-04-01 20:00:00",
            "2035-04-01T20:00:00",
            "2035-04-01T20:00",
        ] {
            let data = form(&format!("artist_id=4&venue_id=1&start_time={start}"));
            let show = show_from_form(&data).unwrap();
            assert_eq!(show.artist_id, ArtistId::new(4));
            assert_eq!(show.venue_id, VenueId::new(1));
            assert_eq!(show.start_time.to_rfc3339(), "2035-04-01T20:00:00+00:00");
        }
    }

    #[test]
    fn show_rejects_bad_ids_and_timestamps() {
        let data = form("artist_id=four&venue_id=1&start_time=2035-04-01+20:00:00");
        assert_eq!(
            show_from_form(&data).unwrap_err(),
            FormError::InvalidId("artist_id")
        );

        let data = form("artist_id=4&venue_id=1&start_time=next+friday");
        assert_eq!(show_from_form(&data).unwrap_err(), FormError::InvalidStartTime);
    }
}
