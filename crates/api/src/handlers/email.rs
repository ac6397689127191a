//! Admin-triggered newsletter sends.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use codetimes_core::interests::Interest;
use codetimes_newsletter::{DigestRequest, NotifyOutcome};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a digest send.
#[derive(Debug, Serialize)]
pub struct DigestSent {
    pub ok: bool,
    /// Recipients in accepted batches.
    pub sent: usize,
    /// `true` when email is not configured and nothing was sent.
    pub skipped: bool,
}

/// POST /api/v1/email/digest
///
/// Fails with 500 only when every batch was rejected by the transport.
pub async fn send_digest(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<DigestRequest>,
) -> AppResult<impl IntoResponse> {
    let report = state.newsletter.send_digest(&state.pool, &request).await?;

    if report.all_failed() {
        return Err(AppError::InternalError(format!(
            "Digest delivery failed for all {} recipients",
            report.failed
        )));
    }

    tracing::info!(
        admin = %admin.email,
        sent = report.sent,
        failed = report.failed,
        skipped = report.skipped,
        "Digest sent",
    );

    Ok(Json(DigestSent {
        ok: true,
        sent: report.sent,
        skipped: report.skipped,
    }))
}

async fn notify(state: &AppState, kind: Interest) -> AppResult<NotifyOutcome> {
    Ok(state.newsletter.notify_pending(&state.pool, kind).await?)
}

/// POST /api/v1/notify/blog
///
/// Runs the new-post notification pass for blog posts now.
pub async fn notify_blog(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let outcome = notify(&state, Interest::Blog).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/notify/teaching
pub async fn notify_teaching(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let outcome = notify(&state, Interest::Teaching).await?;
    Ok(Json(DataResponse { data: outcome }))
}
