use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// ```text
/// GET    /media    -> list_media (admin)
/// POST   /media    -> record_media (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/media", get(media::list_media).post(media::record_media))
}
