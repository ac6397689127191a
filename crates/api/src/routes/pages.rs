use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, pages};
use crate::state::AppState;

/// Server-rendered pages, mounted at the root.
///
/// ```text
/// GET    /auth/signin       -> signin_page
/// POST   /auth/signin       -> signin_submit
/// POST   /auth/signout      -> signout
/// GET    /403               -> forbidden
/// GET    /admin             -> admin_shell
/// GET    /admin/{*rest}     -> admin_shell
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signin", get(auth::signin_page).post(auth::signin_submit))
        .route("/auth/signout", post(auth::signout))
        .route("/403", get(pages::forbidden))
        .route("/admin", get(pages::admin_shell))
        .route("/admin/{*rest}", get(pages::admin_shell))
}
