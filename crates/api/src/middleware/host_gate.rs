//! Host routing and admin dashboard gate.
//!
//! Runs in front of every route, the fallback included. The session cookie
//! is only decoded for gated requests (admin host, protected path).

use axum::extract::{Request, State};
use axum::http::header::HOST;
use axum::http::HeaderName;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use codetimes_core::gate::{self, Decision, Route, SessionState};
use codetimes_core::host::clean_host;

use crate::auth::session::read_session;
use crate::pages;
use crate::state::AppState;

const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Axum middleware applying the gate decision table to a request.
///
/// Install with `axum::middleware::from_fn_with_state`.
pub async fn host_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let headers = request.headers();
    let host = clean_host(
        headers
            .get(X_FORWARDED_HOST)
            .and_then(|v| v.to_str().ok()),
        headers.get(HOST).and_then(|v| v.to_str().ok()),
        request.uri().authority().map(|a| a.as_str()),
    );
    let class = state.config.sites.classify(&host);
    let path = request.uri().path();

    let decision = match gate::route(class, path) {
        Route::Pass => return next.run(request).await,
        Route::RedirectToMain => Decision::RedirectToMain,
        Route::RedirectToAdminRoot => Decision::RedirectToAdminRoot,
        Route::Gated => {
            let (session, _) = read_session(headers, &state.config.session);
            if session == SessionState::Invalid {
                tracing::info!(path = %path, "Invalid session on protected path");
            }
            gate::gate(&session)
        }
    };

    match decision {
        Decision::Pass => next.run(request).await,
        Decision::RewriteForbidden => {
            tracing::debug!(path = %path, "Non-admin session, serving forbidden page");
            pages::forbidden_page().into_response()
        }
        redirect => {
            let location =
                gate::redirect_location(redirect, &state.config.sites, path, request.uri().query());
            let Some(location) = location else {
                return next.run(request).await;
            };
            tracing::debug!(host = %host, path = %path, location = %location, "Gate redirect");
            if redirect == Decision::RedirectToSignIn {
                Redirect::temporary(&location).into_response()
            } else {
                Redirect::permanent(&location).into_response()
            }
        }
    }
}
