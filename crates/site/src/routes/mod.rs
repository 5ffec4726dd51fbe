//! HTTP route handlers for the booking site.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                    - Home page
//! GET    /health              - Health check
//!
//! # Venues
//! GET    /venues              - Venue listing, grouped by city
//! POST   /venues/search       - Venue name search (form field `search_term`)
//! GET    /venues/create       - New venue form
//! POST   /venues/create       - Create venue
//! GET    /venues/{id}         - Venue detail with past/upcoming shows
//! DELETE /venues/{id}         - Delete venue and its shows
//! GET    /venues/{id}/edit    - Edit venue form
//! POST   /venues/{id}/edit    - Update venue
//!
//! # Artists (mirror of the venue surface, minus delete)
//! GET    /artists
//! POST   /artists/search
//! GET    /artists/create
//! POST   /artists/create
//! GET    /artists/{id}
//! GET    /artists/{id}/edit
//! POST   /artists/{id}/edit
//!
//! # Shows
//! GET    /shows               - Show listing
//! GET    /shows/create        - New show form
//! POST   /shows/create        - Create show
//! ```
//!
//! Successful mutations redirect with a `notice` query parameter; failed
//! validation redirects back to the form with an `error` parameter.

pub mod artists;
pub mod home;
pub mod shows;
pub mod venues;

use axum::{Router, response::Redirect, routing::get};
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters for notice/error display on redirect targets.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Redirect to `path` carrying a success notice.
pub(crate) fn notice_redirect(path: &str, notice: &str) -> Redirect {
    Redirect::to(&format!("{path}?notice={}", urlencoding::encode(notice)))
}

/// Redirect back to a form at `path` carrying a validation message.
pub(crate) fn form_retry(path: &str, error: &impl std::fmt::Display) -> Redirect {
    Redirect::to(&format!(
        "{path}?error={}",
        urlencoding::encode(&error.to_string())
    ))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .nest("/venues", venues::router())
        .nest("/artists", artists::router())
        .nest("/shows", shows::router())
}
