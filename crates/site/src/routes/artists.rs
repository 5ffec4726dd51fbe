//! Artist route handlers.
//!
//! Mirror of the venue surface, minus delete and the address field.

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

use encore_core::ArtistId;

use super::{MessageQuery, form_retry, notice_redirect};
use crate::db::{ArtistRepository, ShowRepository};
use crate::error::{AppError, Result};
use crate::forms::{self, FormData, GENRE_CHOICES};
use crate::models::Artist;
use crate::state::AppState;
use crate::views::{self, ArtistDetail, SearchResults};

/// Artist search form data.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// One entry of the artist listing page.
#[derive(Debug, Clone)]
pub struct ArtistItem {
    pub id: ArtistId,
    pub name: String,
}

/// Artist listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/artists.html")]
pub struct ArtistsTemplate {
    pub artists: Vec<ArtistItem>,
}

/// Artist search results page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/search_artists.html")]
pub struct SearchArtistsTemplate {
    pub results: SearchResults,
    pub search_term: String,
}

/// Artist detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/artist.html")]
pub struct ArtistTemplate {
    pub artist: ArtistDetail,
    pub notice: Option<String>,
}

/// New artist form template.
#[derive(Template, WebTemplate)]
#[template(path = "forms/new_artist.html")]
pub struct NewArtistTemplate {
    pub error: Option<String>,
    pub genre_choices: &'static [&'static str],
}

/// Edit artist form template.
#[derive(Template, WebTemplate)]
#[template(path = "forms/edit_artist.html")]
pub struct EditArtistTemplate {
    pub artist: Artist,
    pub genres: Vec<String>,
    pub error: Option<String>,
    pub genre_choices: &'static [&'static str],
}

impl EditArtistTemplate {
    /// Whether a genre choice is already tagged on the artist.
    fn is_selected(&self, genre: impl AsRef<str>) -> bool {
        let genre = genre.as_ref();
        self.genres.iter().any(|tag| tag == genre)
    }

    fn phone(&self) -> &str {
        self.artist.phone.as_deref().unwrap_or("")
    }

    fn image_link(&self) -> &str {
        self.artist.image_link.as_deref().unwrap_or("")
    }

    fn facebook_link(&self) -> &str {
        self.artist.facebook_link.as_deref().unwrap_or("")
    }

    fn website_link(&self) -> &str {
        self.artist.website_link.as_deref().unwrap_or("")
    }

    fn seeking_description(&self) -> &str {
        self.artist.seeking_description.as_deref().unwrap_or("")
    }
}

/// Artist listing: id and name for every artist.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let artists = ArtistRepository::new(state.pool()).all().await?;

    Ok(ArtistsTemplate {
        artists: artists
            .into_iter()
            .map(|artist| ArtistItem {
                id: artist.id,
                name: artist.name,
            })
            .collect(),
    })
}

/// Case-insensitive substring search on artist names.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<impl IntoResponse> {
    let now = Utc::now();
    let repo = ArtistRepository::new(state.pool());

    let artists = repo.search(&form.search_term).await?;
    let upcoming = repo.upcoming_show_counts(now).await?;

    Ok(SearchArtistsTemplate {
        results: views::artist_search_results(&artists, &upcoming),
        search_term: form.search_term,
    })
}

/// Artist detail page with past/upcoming shows.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    // One `now` for the whole partition
    let now = Utc::now();
    let id = ArtistId::new(id);

    let artist = ArtistRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {id}")))?;
    let shows = ShowRepository::new(state.pool()).for_artist(id).await?;

    Ok(ArtistTemplate {
        artist: views::artist_detail(artist, shows, now),
        notice: query.notice,
    })
}

/// Display the new artist form.
pub async fn create_form(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    NewArtistTemplate {
        error: query.error,
        genre_choices: GENRE_CHOICES,
    }
}

/// Handle new artist submission.
#[instrument(skip_all)]
pub async fn create(State(state): State<AppState>, RawForm(body): RawForm) -> Result<Response> {
    let form = FormData::parse(&body);
    let artist = match forms::artist_from_form(&form) {
        Ok(artist) => artist,
        Err(err) => return Ok(form_retry("/artists/create", &err).into_response()),
    };

    let id = ArtistRepository::new(state.pool()).create(&artist).await?;
    tracing::info!(%id, name = %artist.name, "artist listed");

    Ok(notice_redirect(
        "/",
        &format!("Artist {} was successfully listed!", artist.name),
    )
    .into_response())
}

/// Display the edit artist form, prefilled from the current row.
#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let id = ArtistId::new(id);
    let artist = ArtistRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {id}")))?;
    let genres = artist.genre_tags().into_vec();

    Ok(EditArtistTemplate {
        artist,
        genres,
        error: query.error,
        genre_choices: GENRE_CHOICES,
    })
}

/// Handle artist edit submission.
#[instrument(skip_all)]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    RawForm(body): RawForm,
) -> Result<Response> {
    let id = ArtistId::new(id);
    let form = FormData::parse(&body);
    let artist = match forms::artist_from_form(&form) {
        Ok(artist) => artist,
        Err(err) => return Ok(form_retry(&format!("/artists/{id}/edit"), &err).into_response()),
    };

    ArtistRepository::new(state.pool()).update(id, &artist).await?;

    Ok(notice_redirect(
        &format!("/artists/{id}"),
        &format!("Artist {} was successfully updated!", artist.name),
    )
    .into_response())
}

/// Create the artist routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/search", post(search))
        .route("/create", get(create_form).post(create))
        .route("/{id}", get(show))
        .route("/{id}/edit", get(edit_form).post(edit))
}
