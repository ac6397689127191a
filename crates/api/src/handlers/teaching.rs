//! Handlers for teaching history entries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use codetimes_core::error::CoreError;
use codetimes_core::types::{DbId, Timestamp};
use codetimes_core::validation::{require_text, require_text_if_present};
use codetimes_db::models::teaching_post::{CreateTeachingPost, UpdateTeachingPost};
use codetimes_db::repositories::TeachingPostRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, Deleted};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "TeachingPost",
        id,
    })
}

fn check_dates(start: Option<Timestamp>, end: Option<Timestamp>) -> Result<(), CoreError> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(CoreError::Validation(
            "End date must not be before start date".to_string(),
        )),
        _ => Ok(()),
    }
}

/// GET /api/v1/teaching
pub async fn list_posts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let posts = TeachingPostRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/teaching/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = TeachingPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/teaching
pub async fn create_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTeachingPost>,
) -> AppResult<impl IntoResponse> {
    require_text("Title", &input.title)?;
    check_dates(input.start_date, input.end_date)?;

    let post = TeachingPostRepo::create(&state.pool, &input).await?;

    tracing::info!(post_id = post.id, title = %post.title, admin = %admin.email, "Teaching post created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /api/v1/teaching/{id}
pub async fn update_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeachingPost>,
) -> AppResult<impl IntoResponse> {
    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".to_string(),
        )));
    }
    require_text_if_present("Title", input.title.as_deref())?;
    check_dates(input.start_date, input.end_date)?;

    let post = TeachingPostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(post_id = id, admin = %admin.email, "Teaching post updated");

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/teaching/{id}
pub async fn delete_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TeachingPostRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(post_id = id, admin = %admin.email, "Teaching post deleted");

    Ok(Json(DataResponse {
        data: Deleted { success: true },
    }))
}
