//! Venue route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, RawForm, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use encore_core::VenueId;

use super::{MessageQuery, form_retry, notice_redirect};
use crate::db::{ShowRepository, VenueRepository};
use crate::error::{AppError, Result};
use crate::forms::{self, FormData, GENRE_CHOICES};
use crate::models::Venue;
use crate::state::AppState;
use crate::views::{self, CityGroup, SearchResults, VenueDetail};

/// Venue search form data.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Venue listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/venues.html")]
pub struct VenuesTemplate {
    pub areas: Vec<CityGroup>,
}

/// Venue search results page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/search_venues.html")]
pub struct SearchVenuesTemplate {
    pub results: SearchResults,
    pub search_term: String,
}

/// Venue detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/venue.html")]
pub struct VenueTemplate {
    pub venue: VenueDetail,
    pub notice: Option<String>,
}

/// New venue form template.
#[derive(Template, WebTemplate)]
#[template(path = "forms/new_venue.html")]
pub struct NewVenueTemplate {
    pub error: Option<String>,
    pub genre_choices: &'static [&'static str],
}

/// Edit venue form template.
#[derive(Template, WebTemplate)]
#[template(path = "forms/edit_venue.html")]
pub struct EditVenueTemplate {
    pub venue: Venue,
    pub genres: Vec<String>,
    pub error: Option<String>,
    pub genre_choices: &'static [&'static str],
}

impl EditVenueTemplate {
    /// Whether a genre choice is already tagged on the venue.
    fn is_selected(&self, genre: impl AsRef<str>) -> bool {
        let genre = genre.as_ref();
        self.genres.iter().any(|tag| tag == genre)
    }

    fn phone(&self) -> &str {
        self.venue.phone.as_deref().unwrap_or("")
    }

    fn image_link(&self) -> &str {
        self.venue.image_link.as_deref().unwrap_or("")
    }

    fn facebook_link(&self) -> &str {
        self.venue.facebook_link.as_deref().unwrap_or("")
    }

    fn website_link(&self) -> &str {
        self.venue.website_link.as_deref().unwrap_or("")
    }

    fn seeking_description(&self) -> &str {
        self.venue.seeking_description.as_deref().unwrap_or("")
    }
}

/// Venue listing, grouped by city in first-encounter order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let now = Utc::now();
    let repo = VenueRepository::new(state.pool());

    let venues = repo.all().await?;
    let upcoming = repo.upcoming_show_counts(now).await?;

    Ok(VenuesTemplate {
        areas: views::group_venues_by_city(&venues, &upcoming),
    })
}

/// Case-insensitive substring search on venue names.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<impl IntoResponse> {
    let now = Utc::now();
    let repo = VenueRepository::new(state.pool());

    let venues = repo.search(&form.search_term).await?;
    let upcoming = repo.upcoming_show_counts(now).await?;

    Ok(SearchVenuesTemplate {
        results: views::venue_search_results(&venues, &upcoming),
        search_term: form.search_term,
    })
}

/// Venue detail page with past/upcoming shows.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    // One `now` for the whole partition
    let now = Utc::now();
    let id = VenueId::new(id);

    let venue = VenueRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {id}")))?;
    let shows = ShowRepository::new(state.pool()).for_venue(id).await?;

    Ok(VenueTemplate {
        venue: views::venue_detail(venue, shows, now),
        notice: query.notice,
    })
}

/// Display the new venue form.
pub async fn create_form(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    NewVenueTemplate {
        error: query.error,
        genre_choices: GENRE_CHOICES,
    }
}

/// Handle new venue submission.
#[instrument(skip_all)]
pub async fn create(State(state): State<AppState>, RawForm(body): RawForm) -> Result<Response> {
    let form = FormData::parse(&body);
    let venue = match forms::venue_from_form(&form) {
        Ok(venue) => venue,
        Err(err) => return Ok(form_retry("/venues/create", &err).into_response()),
    };

    let id = VenueRepository::new(state.pool()).create(&venue).await?;
    tracing::info!(%id, name = %venue.name, "venue listed");

    Ok(notice_redirect(
        "/",
        &format!("Venue {} was successfully listed!", venue.name),
    )
    .into_response())
}

/// Display the edit venue form, prefilled from the current row.
#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let id = VenueId::new(id);
    let venue = VenueRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {id}")))?;
    let genres = venue.genre_tags().into_vec();

    Ok(EditVenueTemplate {
        venue,
        genres,
        error: query.error,
        genre_choices: GENRE_CHOICES,
    })
}

/// Handle venue edit submission.
#[instrument(skip_all)]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    RawForm(body): RawForm,
) -> Result<Response> {
    let id = VenueId::new(id);
    let form = FormData::parse(&body);
    let venue = match forms::venue_from_form(&form) {
        Ok(venue) => venue,
        Err(err) => return Ok(form_retry(&format!("/venues/{id}/edit"), &err).into_response()),
    };

    VenueRepository::new(state.pool()).update(id, &venue).await?;

    Ok(notice_redirect(
        &format!("/venues/{id}"),
        &format!("Venue {} was successfully updated!", venue.name),
    )
    .into_response())
}

/// Delete a venue and all of its shows, atomically.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let id = VenueId::new(id);
    VenueRepository::new(state.pool()).delete(id).await?;
    tracing::info!(%id, "venue deleted");

    Ok(notice_redirect("/", "Venue was successfully deleted."))
}

/// Create the venue routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/search", post(search))
        .route("/create", get(create_form).post(create))
        .route("/{id}", get(show).delete(delete))
        .route("/{id}/edit", get(edit_form).post(edit))
}
