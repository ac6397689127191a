//! Handlers for the media library.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use codetimes_core::error::CoreError;
use codetimes_core::validation::require_url;
use codetimes_db::models::media::{CreateMedia, Media};
use codetimes_db::repositories::MediaRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// A recorded upload and whether it was already known.
#[derive(Debug, Serialize)]
pub struct RecordedMedia {
    #[serde(flatten)]
    pub media: Media,
    pub skipped: bool,
}

/// Fill in the name and type the file host may omit.
fn normalize(input: &CreateMedia) -> Result<(String, String), CoreError> {
    require_url("URL", &input.url)?;
    if input.size < 0 {
        return Err(CoreError::Validation("Size must not be negative".to_string()));
    }
    let url = input.url.trim();
    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| url.rsplit('/').next().unwrap_or(url).to_string());
    let mime_type = input
        .mime_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("unknown")
        .to_string();
    Ok((name, mime_type))
}

/// GET /api/v1/media
pub async fn list_media(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let media = MediaRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: media }))
}

/// POST /api/v1/media
///
/// 201 for a new upload; 200 with `skipped: true` for a URL already recorded.
pub async fn record_media(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateMedia>,
) -> AppResult<impl IntoResponse> {
    let (name, mime_type) = normalize(&input)?;

    let (media, inserted) =
        MediaRepo::record_upload(&state.pool, input.url.trim(), &name, input.size, &mime_type)
            .await?;

    tracing::info!(media_id = media.id, name = %media.name, inserted, "Media recorded");

    let status = if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(DataResponse {
            data: RecordedMedia {
                media,
                skipped: !inserted,
            },
        }),
    ))
}
