//! Show route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, RawForm, State},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::instrument;

use super::{MessageQuery, form_retry, notice_redirect};
use crate::db::{RepositoryError, ShowRepository};
use crate::error::Result;
use crate::forms::{self, FormData};
use crate::state::AppState;
use crate::views::{self, ShowRow};

/// Show listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/shows.html")]
pub struct ShowsTemplate {
    pub shows: Vec<ShowRow>,
}

/// New show form template.
#[derive(Template, WebTemplate)]
#[template(path = "forms/new_show.html")]
pub struct NewShowTemplate {
    pub error: Option<String>,
}

/// Show listing: every show joined to its venue and artist.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let shows = ShowRepository::new(state.pool()).all_with_parents().await?;

    Ok(ShowsTemplate {
        shows: views::show_rows(shows),
    })
}

/// Display the new show form.
pub async fn create_form(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    NewShowTemplate { error: query.error }
}

/// Handle new show submission.
///
/// A dangling venue or artist id is reported back on the form rather than
/// surfacing as a foreign-key violation.
#[instrument(skip_all)]
pub async fn create(State(state): State<AppState>, RawForm(body): RawForm) -> Result<Response> {
    let form = FormData::parse(&body);
    let show = match forms::show_from_form(&form) {
        Ok(show) => show,
        Err(err) => return Ok(form_retry("/shows/create", &err).into_response()),
    };

    match ShowRepository::new(state.pool()).create(&show).await {
        Ok(id) => {
            tracing::info!(%id, venue_id = %show.venue_id, artist_id = %show.artist_id, "show listed");
            Ok(notice_redirect("/", "Show was successfully listed!").into_response())
        }
        Err(err @ RepositoryError::MissingReference(_)) => {
            Ok(form_retry("/shows/create", &err).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Create the show routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/create", get(create_form).post(create))
}
