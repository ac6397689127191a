//! Sign-in and sign-out for the admin dashboard.
//!
//! The form posts back to itself; success sets the session cookie and
//! redirects (303) to the requested dashboard page.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use codetimes_core::gate::{safe_callback, PROTECTED_PREFIX, SIGNIN_PATH};
use codetimes_core::validation::normalize_email;
use serde::Deserialize;

use crate::auth::credentials::{authenticate, AuthError};
use crate::auth::session::{issue_token, removal_cookie, session_cookie};
use crate::error::{AppError, AppResult};
use crate::pages;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const TOO_MANY_ATTEMPTS: &str = "Too many sign-in attempts. Please try again later.";

#[derive(Debug, Deserialize)]
pub struct SignInQuery {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "callbackUrl", default)]
    pub callback_url: String,
}

/// GET /auth/signin
pub async fn signin_page(Query(query): Query<SignInQuery>) -> impl IntoResponse {
    let callback = query
        .callback_url
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| PROTECTED_PREFIX.to_string());
    pages::signin_page(&callback, None)
}

/// POST /auth/signin
///
/// Failed attempts count against the submitted email; a locked email gets
/// 429 without its password being checked.
pub async fn signin_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> AppResult<Response> {
    let key = normalize_email(&form.email);

    if let Some(remaining) = state.throttle.check(&key, Instant::now()).await {
        tracing::warn!(retry_after_secs = remaining.as_secs(), "Sign-in rejected, key locked");
        return Ok((
            StatusCode::TOO_MANY_REQUESTS,
            pages::signin_page(&form.callback_url, Some(TOO_MANY_ATTEMPTS)),
        )
            .into_response());
    }

    let admin = state.config.admin.clone();
    let (email, password) = (form.email, form.password);
    let outcome = tokio::task::spawn_blocking(move || authenticate(&admin, &email, &password))
        .await
        .map_err(|e| AppError::InternalError(format!("Credential check panicked: {e}")))?;

    match outcome {
        Ok(identity) => {
            state.throttle.record_success(&key).await;

            let token = issue_token(&identity, &state.config.session)
                .map_err(|e| AppError::InternalError(format!("Failed to issue session: {e}")))?;
            let destination = safe_callback(&state.config.sites, Some(&form.callback_url));

            tracing::info!(email = %identity.email, destination = %destination, "Admin signed in");

            let jar = jar.add(session_cookie(token, &state.config.session));
            Ok((jar, Redirect::to(&destination)).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            let locked = state.throttle.record_failure(&key, Instant::now()).await;
            tracing::warn!(locked, "Failed sign-in attempt");
            Ok((
                StatusCode::UNAUTHORIZED,
                pages::signin_page(&form.callback_url, Some(INVALID_CREDENTIALS)),
            )
                .into_response())
        }
    }
}

/// POST /auth/signout
pub async fn signout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(removal_cookie(&state.config.session));
    tracing::info!("Admin signed out");
    (jar, Redirect::to(SIGNIN_PATH))
}
