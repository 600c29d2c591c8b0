pub mod admin;
pub mod feedback;
pub mod health;
pub mod notices;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /notices/                                        list active, ?search= (public)
/// /notices/{code}/                                 get active by code (public)
/// /feedback/                                       submit feedback (public, POST)
///
/// /admin/notices                                   list, create (admin token)
/// /admin/notices/{id}                              get, update, delete
/// /admin/notices/{id}/keywords                     add keyword (POST)
/// /admin/notices/{id}/keywords/{keyword_id}        remove keyword (DELETE)
/// /admin/notices/{id}/feedback                     feedback summary (GET)
/// ```
///
/// Public routes answer with and without the trailing slash.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(notices::router())
        .merge(feedback::router())
        .merge(admin::router())
}
