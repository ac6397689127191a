pub mod blog;
pub mod email;
pub mod health;
pub mod hero;
pub mod media;
pub mod pages;
pub mod subscribers;
pub mod teaching;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /blog                          list (public), create (admin)
/// /blog/{id}                     get (public), update, delete (admin)
///
/// /teaching                      list (public), create (admin)
/// /teaching/{id}                 get (public), update, delete (admin)
///
/// /hero                          get (public, ?page=), replace (admin)
///
/// /subscribers                   subscribe (public), list (admin)
/// /subscribers/{id}              update, delete (admin)
///
/// /unsubscribe                   by token (GET ?t=), by email (POST)
///
/// /email/digest                  send a digest (admin)
/// /notify/blog                   announce pending blog posts (admin)
/// /notify/teaching               announce pending teaching posts (admin)
///
/// /media                         list, record upload (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/blog", blog::router())
        .nest("/teaching", teaching::router())
        .merge(hero::router())
        .nest("/subscribers", subscribers::router())
        .route(
            "/unsubscribe",
            get(handlers::unsubscribe::unsubscribe_by_token)
                .post(handlers::unsubscribe::unsubscribe_by_email),
        )
        .merge(email::router())
        .merge(media::router())
}
