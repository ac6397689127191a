use axum::routing::{post, put};
use axum::Router;

use crate::handlers::subscribers;
use crate::state::AppState;

/// Subscriber routes mounted at `/subscribers`.
///
/// ```text
/// POST   /        -> subscribe
/// GET    /        -> list_subscribers (admin)
/// PUT    /{id}    -> update_subscriber (admin)
/// DELETE /{id}    -> delete_subscriber (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(subscribers::subscribe).get(subscribers::list_subscribers),
        )
        .route(
            "/{id}",
            put(subscribers::update_subscriber).delete(subscribers::delete_subscriber),
        )
}
