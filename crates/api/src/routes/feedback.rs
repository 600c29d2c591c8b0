//! Route definitions for feedback intake.

use axum::routing::post;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Routes for `/feedback`.
///
/// ```text
/// POST /feedback/    -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/feedback", post(feedback::submit))
        .route("/feedback/", post(feedback::submit))
}
