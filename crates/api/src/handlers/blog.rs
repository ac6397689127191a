//! Handlers for blog posts.
//!
//! Reads are public; writes require an admin session.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use codetimes_core::error::CoreError;
use codetimes_core::types::DbId;
use codetimes_core::validation::{require_text, require_text_if_present, require_url};
use codetimes_db::models::blog_post::{CreateBlogPost, UpdateBlogPost};
use codetimes_db::repositories::BlogPostRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, Deleted};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "BlogPost",
        id,
    })
}

fn validate_create(input: &CreateBlogPost) -> Result<(), CoreError> {
    require_text("Title", &input.title)?;
    require_text("Summary", &input.summary)?;
    require_text("Content", &input.content)?;
    require_url("Image", &input.image)
}

fn validate_update(input: &UpdateBlogPost) -> Result<(), CoreError> {
    if input.is_empty() {
        return Err(CoreError::Validation("No fields to update".to_string()));
    }
    require_text_if_present("Title", input.title.as_deref())?;
    require_text_if_present("Summary", input.summary.as_deref())?;
    require_text_if_present("Content", input.content.as_deref())?;
    if let Some(image) = &input.image {
        require_url("Image", image)?;
    }
    Ok(())
}

/// GET /api/v1/blog
///
/// All posts, newest first.
pub async fn list_posts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let posts = BlogPostRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/blog/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/blog
///
/// The byline is always the configured site author.
pub async fn create_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    let post = BlogPostRepo::create(&state.pool, &input, &state.config.site_author).await?;

    tracing::info!(post_id = post.id, title = %post.title, admin = %admin.email, "Blog post created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /api/v1/blog/{id}
pub async fn update_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;

    let post = BlogPostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(post_id = id, admin = %admin.email, "Blog post updated");

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/blog/{id}
pub async fn delete_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !BlogPostRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(post_id = id, admin = %admin.email, "Blog post deleted");

    Ok(Json(DataResponse {
        data: Deleted { success: true },
    }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn valid_post() -> CreateBlogPost {
        CreateBlogPost {
            title: "On semicolons".into(),
            summary: "A love letter".into(),
            content: "<p>Yes.</p>".into(),
            image: "https://utfs.io/f/semicolon.jpg".into(),
            media_id: None,
        }
    }

    #[test]
    fn test_create_requires_every_field() {
        assert!(validate_create(&valid_post()).is_ok());

        let blank_title = CreateBlogPost {
            title: "   ".into(),
            ..valid_post()
        };
        assert_matches!(
            validate_create(&blank_title),
            Err(CoreError::Validation(msg)) if msg == "Title is required"
        );

        let relative_image = CreateBlogPost {
            image: "/img.png".into(),
            ..valid_post()
        };
        assert_matches!(validate_create(&relative_image), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_update_needs_a_field_and_valid_values() {
        assert_matches!(
            validate_update(&UpdateBlogPost::default()),
            Err(CoreError::Validation(msg)) if msg == "No fields to update"
        );
        assert!(validate_update(&UpdateBlogPost {
            summary: Some("New summary".into()),
            ..Default::default()
        })
        .is_ok());
        assert!(validate_update(&UpdateBlogPost {
            content: Some(String::new()),
            ..Default::default()
        })
        .is_err());
    }
}
