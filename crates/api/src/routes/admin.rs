//! Route definitions for catalog administration.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes for `/admin/notices`.
///
/// ```text
/// GET    /admin/notices                                 -> list
/// POST   /admin/notices                                 -> create
/// GET    /admin/notices/{id}                            -> get_by_id
/// PUT    /admin/notices/{id}                            -> update
/// DELETE /admin/notices/{id}                            -> delete
/// POST   /admin/notices/{id}/keywords                   -> add_keyword
/// DELETE /admin/notices/{id}/keywords/{keyword_id}      -> remove_keyword
/// GET    /admin/notices/{id}/feedback                   -> feedback_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/notices", get(admin::list).post(admin::create))
        .route(
            "/admin/notices/{id}",
            get(admin::get_by_id)
                .put(admin::update)
                .delete(admin::delete),
        )
        .route("/admin/notices/{id}/keywords", post(admin::add_keyword))
        .route(
            "/admin/notices/{id}/keywords/{keyword_id}",
            delete(admin::remove_keyword),
        )
        .route("/admin/notices/{id}/feedback", get(admin::feedback_summary))
}
