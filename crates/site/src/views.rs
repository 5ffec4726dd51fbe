//! View-model assembly.
//!
//! The aggregation layer of the site: pure functions that turn stored
//! records into the plain structures the templates render. Nothing in this
//! module touches the database or the clock - callers fetch the records and
//! capture `now` once per request, so a whole page is classified against a
//! single consistent instant.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use encore_core::{ArtistId, GenreList, VenueId};

use crate::models::{Artist, ShowListing, ShowWithArtist, ShowWithVenue, Venue};

/// Display format for show start times: month/day/year, 24-hour clock.
const START_TIME_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

/// Format a show start time for display.
#[must_use]
pub fn format_start_time(start_time: DateTime<Utc>) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}

/// True when a show counts as upcoming relative to `now`.
///
/// Strictly greater: a show starting at exactly `now` is already past.
#[must_use]
pub fn is_upcoming(start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start_time > now
}

// =============================================================================
// Venue listing
// =============================================================================

/// One venue entry inside a city group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub id: VenueId,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues of one city, grouped for the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Group venues by their literal city string, in first-encounter order.
///
/// The grouping key is the city exactly as stored - no trimming or case
/// folding - and group order follows the scan order of `venues`, which
/// downstream display depends on. `upcoming` maps venue id to its upcoming-
/// show count; venues absent from the map have zero.
#[must_use]
pub fn group_venues_by_city(
    venues: &[Venue],
    upcoming: &HashMap<VenueId, i64>,
) -> Vec<CityGroup> {
    let mut groups: Vec<CityGroup> = Vec::new();
    let mut index_by_city: HashMap<&str, usize> = HashMap::new();

    for venue in venues {
        let summary = VenueSummary {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
        };

        if let Some(&i) = index_by_city.get(venue.city.as_str()) {
            if let Some(group) = groups.get_mut(i) {
                group.venues.push(summary);
            }
        } else {
            index_by_city.insert(venue.city.as_str(), groups.len());
            groups.push(CityGroup {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: vec![summary],
            });
        }
    }

    groups
}

// =============================================================================
// Search
// =============================================================================

/// One search hit, venue or artist alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Search results: the match count plus the hits in storage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchMatch>,
}

impl SearchResults {
    fn from_matches(data: Vec<SearchMatch>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Assemble venue search results.
#[must_use]
pub fn venue_search_results(venues: &[Venue], upcoming: &HashMap<VenueId, i64>) -> SearchResults {
    SearchResults::from_matches(
        venues
            .iter()
            .map(|venue| SearchMatch {
                id: venue.id.as_i32(),
                name: venue.name.clone(),
                num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
            })
            .collect(),
    )
}

/// Assemble artist search results.
#[must_use]
pub fn artist_search_results(
    artists: &[Artist],
    upcoming: &HashMap<ArtistId, i64>,
) -> SearchResults {
    SearchResults::from_matches(
        artists
            .iter()
            .map(|artist| SearchMatch {
                id: artist.id.as_i32(),
                name: artist.name.clone(),
                num_upcoming_shows: upcoming.get(&artist.id).copied().unwrap_or(0),
            })
            .collect(),
    )
}

// =============================================================================
// Detail pages
// =============================================================================

/// One show on a detail page, carrying the counterpart entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowEntry {
    /// Counterpart id: the artist on a venue page, the venue on an artist page.
    pub id: i32,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: String,
}

/// Venue detail page data.
#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<ShowEntry>,
    pub upcoming_shows: Vec<ShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Artist detail page data.
#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<ShowEntry>,
    pub upcoming_shows: Vec<ShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Split entries into (past, upcoming) against a single `now`.
fn partition_entries<T>(
    items: Vec<T>,
    now: DateTime<Utc>,
    start: impl Fn(&T) -> DateTime<Utc>,
    entry: impl Fn(T) -> ShowEntry,
) -> (Vec<ShowEntry>, Vec<ShowEntry>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for item in items {
        if is_upcoming(start(&item), now) {
            upcoming.push(entry(item));
        } else {
            past.push(entry(item));
        }
    }
    (past, upcoming)
}

/// Assemble a venue detail page from the venue row and its joined shows.
#[must_use]
pub fn venue_detail(venue: Venue, shows: Vec<ShowWithArtist>, now: DateTime<Utc>) -> VenueDetail {
    let (past_shows, upcoming_shows) = partition_entries(
        shows,
        now,
        |show| show.start_time,
        |show| ShowEntry {
            id: show.artist_id.as_i32(),
            name: show.artist_name,
            image_link: show.artist_image_link,
            start_time: format_start_time(show.start_time),
        },
    );

    VenueDetail {
        id: venue.id,
        name: venue.name,
        city: venue.city,
        state: venue.state,
        address: venue.address,
        phone: venue.phone,
        genres: GenreList::from_stored(&venue.genres).into_vec(),
        image_link: venue.image_link,
        facebook_link: venue.facebook_link,
        website_link: venue.website_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

/// Assemble an artist detail page from the artist row and its joined shows.
#[must_use]
pub fn artist_detail(
    artist: Artist,
    shows: Vec<ShowWithVenue>,
    now: DateTime<Utc>,
) -> ArtistDetail {
    let (past_shows, upcoming_shows) = partition_entries(
        shows,
        now,
        |show| show.start_time,
        |show| ShowEntry {
            id: show.venue_id.as_i32(),
            name: show.venue_name,
            image_link: show.venue_image_link,
            start_time: format_start_time(show.start_time),
        },
    );

    ArtistDetail {
        id: artist.id,
        name: artist.name,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        genres: GenreList::from_stored(&artist.genres).into_vec(),
        image_link: artist.image_link,
        facebook_link: artist.facebook_link,
        website_link: artist.website_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

// =============================================================================
// Show listing
// =============================================================================

/// One row of the shows listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowRow {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// Flatten joined show rows for the listing page.
#[must_use]
pub fn show_rows(shows: Vec<ShowListing>) -> Vec<ShowRow> {
    shows
        .into_iter()
        .map(|show| ShowRow {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: format_start_time(show.start_time),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn venue(id: i32, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id: VenueId::new(id),
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "123 Main St".to_string(),
            phone: None,
            genres: "Jazz,Reggae".to_string(),
            image_link: None,
            facebook_link: None,
            website_link: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn artist(id: i32, name: &str) -> Artist {
        Artist {
            id: ArtistId::new(id),
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: None,
            genres: "Rock n Roll".to_string(),
            image_link: None,
            facebook_link: None,
            website_link: None,
            seeking_venue: true,
            seeking_description: None,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn groups_every_city_exactly_once() {
        let venues = vec![
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
        ];
        let groups = group_venues_by_city(&venues, &HashMap::new());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].city, "San Francisco");
        assert_eq!(groups[0].venues.len(), 2);
        assert_eq!(groups[1].city, "New York");
        assert_eq!(groups[1].venues.len(), 1);
    }

    #[test]
    fn group_order_follows_first_encounter() {
        let venues = vec![
            venue(1, "A", "Zion", "IL"),
            venue(2, "B", "Austin", "TX"),
            venue(3, "C", "Zion", "IL"),
        ];
        let groups = group_venues_by_city(&venues, &HashMap::new());

        // Not alphabetical: Zion was seen before Austin
        let cities: Vec<&str> = groups.iter().map(|g| g.city.as_str()).collect();
        assert_eq!(cities, ["Zion", "Austin"]);
    }

    #[test]
    fn city_grouping_is_case_sensitive() {
        let venues = vec![
            venue(1, "A", "san francisco", "CA"),
            venue(2, "B", "San Francisco", "CA"),
        ];
        let groups = group_venues_by_city(&venues, &HashMap::new());
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn upcoming_counts_default_to_zero() {
        let venues = vec![venue(1, "A", "Austin", "TX"), venue(2, "B", "Austin", "TX")];
        let mut upcoming = HashMap::new();
        upcoming.insert(VenueId::new(2), 3);

        let groups = group_venues_by_city(&venues, &upcoming);
        assert_eq!(groups[0].venues[0].num_upcoming_shows, 0);
        assert_eq!(groups[0].venues[1].num_upcoming_shows, 3);
    }

    #[test]
    fn search_results_carry_count_and_order() {
        let artists = vec![artist(4, "Guns N Petals"), artist(6, "The Wild Sax Band")];
        let mut upcoming = HashMap::new();
        upcoming.insert(ArtistId::new(6), 1);

        let results = artist_search_results(&artists, &upcoming);
        assert_eq!(results.count, 2);
        assert_eq!(results.data[0].name, "Guns N Petals");
        assert_eq!(results.data[0].num_upcoming_shows, 0);
        assert_eq!(results.data[1].num_upcoming_shows, 1);
    }

    #[test]
    fn start_time_formats_fixed_24_hour() {
        let start = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(format_start_time(start), "04/01/2035, 20:00:00");
    }

    #[test]
    fn partition_uses_single_now_with_strict_boundary() {
        let now = at(1_000);
        let shows = vec![
            ShowWithArtist {
                artist_id: ArtistId::new(1),
                artist_name: "Past".to_string(),
                artist_image_link: None,
                start_time: at(999),
            },
            ShowWithArtist {
                artist_id: ArtistId::new(2),
                artist_name: "Boundary".to_string(),
                artist_image_link: None,
                start_time: at(1_000),
            },
            ShowWithArtist {
                artist_id: ArtistId::new(3),
                artist_name: "Upcoming".to_string(),
                artist_image_link: None,
                start_time: at(1_001),
            },
        ];

        let detail = venue_detail(venue(1, "The Musical Hop", "San Francisco", "CA"), shows, now);

        // A show starting at exactly `now` is past, not upcoming
        assert_eq!(detail.past_shows_count, 2);
        assert_eq!(detail.upcoming_shows_count, 1);
        assert_eq!(
            detail.past_shows_count + detail.upcoming_shows_count,
            3,
            "past + upcoming must sum to total"
        );
        assert_eq!(detail.upcoming_shows[0].name, "Upcoming");
    }

    #[test]
    fn detail_splits_genres_into_list() {
        let detail = venue_detail(
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            Vec::new(),
            at(0),
        );
        assert_eq!(detail.genres, ["Jazz", "Reggae"]);
    }

    #[test]
    fn artist_detail_carries_venue_counterparts() {
        let now = at(500);
        let shows = vec![ShowWithVenue {
            venue_id: VenueId::new(9),
            venue_name: "The Musical Hop".to_string(),
            venue_image_link: Some("https://example.com/hop.jpg".to_string()),
            start_time: at(600),
        }];

        let detail = artist_detail(artist(4, "Guns N Petals"), shows, now);
        assert_eq!(detail.upcoming_shows_count, 1);
        assert_eq!(detail.upcoming_shows[0].id, 9);
        assert_eq!(detail.upcoming_shows[0].name, "The Musical Hop");
    }

    #[test]
    fn show_rows_flatten_and_format() {
        let rows = show_rows(vec![ShowListing {
            venue_id: VenueId::new(1),
            venue_name: "The Musical Hop".to_string(),
            artist_id: ArtistId::new(4),
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: None,
            start_time: Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap(),
        }]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].venue_name, "The Musical Hop");
        assert_eq!(rows[0].start_time, "04/01/2035, 20:00:00");
    }
}
