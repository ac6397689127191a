use axum::routing::get;
use axum::Router;

use crate::handlers::hero;
use crate::state::AppState;

/// ```text
/// GET    /hero     -> get_hero
/// POST   /hero     -> save_hero (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/hero", get(hero::get_hero).post(hero::save_hero))
}
