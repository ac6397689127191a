//! HTML page handlers outside the sign-in flow.

use axum::extract::State;
use axum::http::{HeaderMap, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use codetimes_core::gate::{self, Decision};

use crate::auth::session::read_session;
use crate::pages;
use crate::state::AppState;

/// GET /403
pub async fn forbidden() -> impl IntoResponse {
    pages::forbidden_page()
}

/// GET /admin, GET /admin/{*rest}
///
/// The host gate covers the admin host; this repeats the session check so
/// the shell is never served to a non-admin on any other host.
pub async fn admin_shell(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let (session, claims) = read_session(&headers, &state.config.session);

    match gate::gate(&session) {
        Decision::Pass => {
            let email = claims.map(|c| c.email).unwrap_or_default();
            pages::admin_shell(&email).into_response()
        }
        Decision::RewriteForbidden => pages::forbidden_page().into_response(),
        _ => {
            let sites = &state.config.sites;
            let original = gate::admin_request_url(sites, uri.path(), uri.query());
            Redirect::temporary(&gate::signin_url(sites, &original)).into_response()
        }
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    pages::not_found()
}
