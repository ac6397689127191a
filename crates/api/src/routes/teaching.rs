use axum::routing::get;
use axum::Router;

use crate::handlers::teaching;
use crate::state::AppState;

/// Teaching routes mounted at `/teaching`.
///
/// ```text
/// GET    /        -> list_posts
/// POST   /        -> create_post (admin)
/// GET    /{id}    -> get_post
/// PUT    /{id}    -> update_post (admin)
/// DELETE /{id}    -> delete_post (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teaching::list_posts).post(teaching::create_post))
        .route(
            "/{id}",
            get(teaching::get_post)
                .put(teaching::update_post)
                .delete(teaching::delete_post),
        )
}
