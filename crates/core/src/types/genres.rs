//! Genre-tag lists and their delimited storage form.
//!
//! Venues and artists carry genre tags. The storage layer persists them as a
//! single comma-delimited string; everywhere else they are an ordered list.
//! Round-tripping through [`GenreList::to_stored`] and
//! [`GenreList::from_stored`] must not lose or reorder tags, which is only
//! sound if no tag contains the delimiter - [`GenreList::from_tags`] rejects
//! such tags at the input boundary.

use thiserror::Error;

/// Separator used in the stored representation.
pub const GENRE_DELIMITER: char = ',';

/// Error constructing a [`GenreList`] from user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenreError {
    /// A tag contains the delimiter and would not survive a round-trip.
    #[error("genre {0:?} must not contain '{GENRE_DELIMITER}'")]
    DelimiterInTag(String),
}

/// An ordered list of genre tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreList(Vec<String>);

impl GenreList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a list from user-supplied tags, preserving order.
    ///
    /// Empty tags are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GenreError::DelimiterInTag`] if any tag contains the
    /// delimiter character.
    pub fn from_tags<I, S>(tags: I) -> Result<Self, GenreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if tag.is_empty() {
                continue;
            }
            if tag.contains(GENRE_DELIMITER) {
                return Err(GenreError::DelimiterInTag(tag));
            }
            list.push(tag);
        }
        Ok(Self(list))
    }

    /// Parse the stored delimited string back into a list.
    ///
    /// The empty string parses to the empty list.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        Self(
            raw.split(GENRE_DELIMITER)
                .filter(|tag| !tag.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        )
    }

    /// The delimited string persisted by the storage layer.
    #[must_use]
    pub fn to_stored(&self) -> String {
        self.0.join(&GENRE_DELIMITER.to_string())
    }

    /// The tags, in input order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Consume the list, yielding the tags.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_order() {
        let list = GenreList::from_tags(["Jazz", "Reggae"]).unwrap();
        assert_eq!(list.to_stored(), "Jazz,Reggae");

        let parsed = GenreList::from_stored(&list.to_stored());
        assert_eq!(parsed, list);
        assert_eq!(parsed.tags(), ["Jazz".to_string(), "Reggae".to_string()]);
    }

    #[test]
    fn empty_string_parses_to_empty_list() {
        let list = GenreList::from_stored("");
        assert!(list.is_empty());
        assert_eq!(list.to_stored(), "");
    }

    #[test]
    fn delimiter_in_tag_is_rejected() {
        let err = GenreList::from_tags(["Rock,Roll"]).unwrap_err();
        assert_eq!(err, GenreError::DelimiterInTag("Rock,Roll".to_string()));
    }

    #[test]
    fn empty_tags_are_dropped() {
        let list = GenreList::from_tags(["", "Folk", ""]).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.to_stored(), "Folk");
    }

    #[test]
    fn single_tag_round_trips() {
        let list = GenreList::from_tags(["Classical"]).unwrap();
        assert_eq!(GenreList::from_stored("Classical"), list);
    }
}
