//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};

use super::MessageQuery;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub notice: Option<String>,
}

/// Display the home page, with an optional post-redirect notice.
pub async fn index(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    HomeTemplate {
        notice: query.notice,
    }
}
