use axum::routing::get;
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Blog routes mounted at `/blog`.
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
        .route("/", get(blog::list_posts).post(blog::create_post))
        .route(
            "/{id}",
            get(blog::get_post)
                .put(blog::update_post)
                .delete(blog::delete_post),
        )
}
