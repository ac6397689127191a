use axum::routing::post;
use axum::Router;

use crate::handlers::email;
use crate::state::AppState;

/// Newsletter send routes (admin only).
///
/// ```text
/// POST   /email/digest      -> send_digest
/// POST   /notify/blog       -> notify_blog
/// POST   /notify/teaching   -> notify_teaching
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/email/digest", post(email::send_digest))
        .route("/notify/blog", post(email::notify_blog))
        .route("/notify/teaching", post(email::notify_teaching))
}
