//! Seed the database with demo venues, artists, and shows.
//!
//! The data set is small enough to browse by hand: three venues across two
//! cities, three artists, and a mix of past and upcoming shows.

use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

use encore_core::GenreList;
use encore_site::db::{ArtistRepository, ShowRepository, VenueRepository};
use encore_site::models::{NewArtist, NewShow, NewVenue};

/// Seed demo data.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or any insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url()?;
    let pool = encore_site::db::create_pool(&database_url).await?;

    info!("Seeding venues...");
    let venues = VenueRepository::new(&pool);

    let musical_hop = venues
        .create(&NewVenue {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: Some("123-123-1234".to_string()),
            genres: GenreList::from_tags(["Jazz", "Reggae", "Swing", "Classical", "Folk"])?,
            image_link: Some(
                "https://images.unsplash.com/photo-1543900694-133f37abaaa5".to_string(),
            ),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            website_link: Some("https://www.themusicalhop.com".to_string()),
            seeking_talent: true,
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .to_string(),
            ),
        })
        .await?;

    // No show has been booked there yet
    let _dueling_pianos = venues
        .create(&NewVenue {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            phone: Some("914-003-1132".to_string()),
            genres: GenreList::from_tags(["Classical", "R&B", "Hip-Hop"])?,
            image_link: Some(
                "https://images.unsplash.com/photo-1497032205916-ac775f0649ae".to_string(),
            ),
            facebook_link: Some("https://www.facebook.com/theduelingpianos".to_string()),
            website_link: Some("https://www.theduelingpianos.com".to_string()),
            seeking_talent: false,
            seeking_description: None,
        })
        .await?;

    let park_square = venues
        .create(&NewVenue {
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            phone: Some("415-000-1234".to_string()),
            genres: GenreList::from_tags(["Rock n Roll", "Jazz", "Classical", "Folk"])?,
            image_link: Some(
                "https://images.unsplash.com/photo-1485686531765-ba63b07845a7".to_string(),
            ),
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".to_string()),
            website_link: Some("https://www.parksquarelivemusicandcoffee.com".to_string()),
            seeking_talent: false,
            seeking_description: None,
        })
        .await?;

    info!("Seeding artists...");
    let artists = ArtistRepository::new(&pool);

    let guns_n_petals = artists
        .create(&NewArtist {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("326-123-5000".to_string()),
            genres: GenreList::from_tags(["Rock n Roll"])?,
            image_link: Some(
                "https://images.unsplash.com/photo-1549213783-8284d0336c4f".to_string(),
            ),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".to_string()),
            website_link: Some("https://www.gunsnpetalsband.com".to_string()),
            seeking_venue: true,
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".to_string(),
            ),
        })
        .await?;

    let matt_quevedo = artists
        .create(&NewArtist {
            name: "Matt Quevedo".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: Some("300-400-5000".to_string()),
            genres: GenreList::from_tags(["Jazz"])?,
            image_link: Some(
                "https://images.unsplash.com/photo-1495223153807-b916f75de8c5".to_string(),
            ),
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".to_string()),
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        })
        .await?;

    let wild_sax_band = artists
        .create(&NewArtist {
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("432-325-5432".to_string()),
            genres: GenreList::from_tags(["Jazz", "Classical"])?,
            image_link: Some(
                "https://images.unsplash.com/photo-1558369981-f9ca78462e61".to_string(),
            ),
            facebook_link: None,
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        })
        .await?;

    info!("Seeding shows...");
    let shows = ShowRepository::new(&pool);

    let bookings = [
        (musical_hop, guns_n_petals, at(2019, 5, 21, 21, 30)?),
        (park_square, matt_quevedo, at(2019, 6, 15, 23, 0)?),
        (park_square, wild_sax_band, at(2035, 4, 1, 20, 0)?),
        (park_square, wild_sax_band, at(2035, 4, 8, 20, 0)?),
        (park_square, wild_sax_band, at(2035, 4, 15, 20, 0)?),
    ];
    for (venue_id, artist_id, start_time) in bookings {
        shows
            .create(&NewShow {
                venue_id,
                artist_id,
                start_time,
            })
            .await?;
    }

    info!("Seeding complete");
    Ok(())
}

fn at(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| "invalid seed timestamp".into())
}
