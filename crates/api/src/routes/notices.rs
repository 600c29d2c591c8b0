//! Route definitions for the public notice lookup.

use axum::routing::get;
use axum::Router;

use crate::handlers::notices;
use crate::state::AppState;

/// Routes for `/notices`.
///
/// ```text
/// GET /notices/           -> list (optional ?search=)
/// GET /notices/{code}/    -> get_by_code
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notices", get(notices::list))
        .route("/notices/", get(notices::list))
        .route("/notices/{code}", get(notices::get_by_code))
        .route("/notices/{code}/", get(notices::get_by_code))
}
