//! Newtype IDs for type-safe entity references.
//!
//! IDs are assigned by the storage layer (`SERIAL` columns) and are immutable
//! once created. Wrapping the raw `i32` prevents accidentally passing a venue
//! id where an artist id is expected - a real hazard in a schema where shows
//! carry both.

/// Define a type-safe ID wrapper around `i32`.
///
/// With the `postgres` feature enabled the wrapper encodes and decodes as a
/// plain `INTEGER` via `#[sqlx(transparent)]`.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type))]
        #[cfg_attr(feature = "postgres", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create an ID from its raw storage value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the raw storage value.
            #[must_use]
            pub const fn as_i32(self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identity of a venue row.
    VenueId
);
entity_id!(
    /// Identity of an artist row.
    ArtistId
);
entity_id!(
    /// Identity of a show row.
    ShowId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_raw_value() {
        assert_eq!(VenueId::new(7).to_string(), "7");
        assert_eq!(ArtistId::new(42).to_string(), "42");
    }

    #[test]
    fn round_trips_through_i32() {
        let id = ShowId::from(13);
        assert_eq!(id.as_i32(), 13);
        assert_eq!(i32::from(id), 13);
    }

    #[test]
    fn ids_of_the_same_entity_compare() {
        assert_eq!(VenueId::new(1), VenueId::new(1));
        assert_ne!(VenueId::new(1), VenueId::new(2));
    }
}
