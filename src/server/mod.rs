//! Server module - HTTP surface around the report builder

mod routes;

use axum::{routing::get, Router};

/// Two-endpoint app: the form page and the report download.
pub fn router() -> Router {
    Router::new().route("/", get(routes::form_page).post(routes::generate_report))
}
