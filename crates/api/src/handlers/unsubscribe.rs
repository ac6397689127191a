//! One-click and by-email unsubscribe.
//!
//! Responses are `{ok, message}` rather than the data envelope, since the
//! public site shows the message verbatim.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use codetimes_core::error::CoreError;
use codetimes_core::validation::normalize_email;
use codetimes_db::repositories::SubscriberRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::Message;
use crate::state::AppState;

const UNSUBSCRIBED: &str = "You have been unsubscribed.";
const NOT_SUBSCRIBED: &str = "This email was not subscribed.";

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub t: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnsubscribeByEmail {
    pub email: Option<String>,
}

/// GET /api/v1/unsubscribe?t=<token>
pub async fn unsubscribe_by_token(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> AppResult<impl IntoResponse> {
    let token = query
        .t
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Token required".to_string()))?;

    let subscriber = SubscriberRepo::unsubscribe_by_token(&state.pool, token)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired token".to_string()))?;

    tracing::info!(subscriber_id = subscriber.id, "Unsubscribed via link");

    Ok(Json(Message {
        ok: true,
        message: UNSUBSCRIBED,
    }))
}

/// POST /api/v1/unsubscribe
pub async fn unsubscribe_by_email(
    State(state): State<AppState>,
    Json(input): Json<UnsubscribeByEmail>,
) -> AppResult<impl IntoResponse> {
    let email = input
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("Email is required".to_string())))?;

    let message = match SubscriberRepo::unsubscribe_by_email(&state.pool, &email).await? {
        Some(subscriber) => {
            tracing::info!(subscriber_id = subscriber.id, "Unsubscribed by email");
            UNSUBSCRIBED
        }
        None => NOT_SUBSCRIBED,
    };

    Ok(Json(Message { ok: true, message }))
}
