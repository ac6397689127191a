//! Handlers for newsletter subscribers.
//!
//! Subscribing is public; listing and editing require an admin session.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use codetimes_core::error::CoreError;
use codetimes_core::interests::{parse_interests, to_tags};
use codetimes_core::types::DbId;
use codetimes_core::validation::{parse_email, require_text_if_present};
use codetimes_db::models::subscriber::{CreateSubscriber, NewSubscriber, UpdateSubscriber};
use codetimes_db::repositories::SubscriberRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, Deleted};
use crate::state::AppState;

const DEFAULT_NAME: &str = "Anonymous";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Subscriber",
        id,
    })
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validate and normalize a subscribe request into an insert.
fn new_subscriber(input: &CreateSubscriber) -> Result<NewSubscriber, CoreError> {
    let email = parse_email(&input.email)?;
    let interests = parse_interests(&input.interests)?;
    Ok(NewSubscriber {
        email,
        name: trimmed(input.name.as_deref()).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        interests: to_tags(&interests),
        location: trimmed(input.location.as_deref()),
        unsubscribe_token: Uuid::new_v4().simple().to_string(),
    })
}

/// Validate and normalize an admin edit.
fn normalize_update(input: &UpdateSubscriber) -> Result<UpdateSubscriber, CoreError> {
    if input.is_empty() {
        return Err(CoreError::Validation("No fields to update".to_string()));
    }
    require_text_if_present("Name", input.name.as_deref())?;
    Ok(UpdateSubscriber {
        email: input.email.as_deref().map(parse_email).transpose()?,
        name: input.name.as_deref().map(|n| n.trim().to_string()),
        interests: input
            .interests
            .as_deref()
            .map(|raw| parse_interests(raw).map(|i| to_tags(&i)))
            .transpose()?,
        location: input.location.as_deref().map(|l| l.trim().to_string()),
    })
}

/// POST /api/v1/subscribers
///
/// A previously unsubscribed email is reactivated. The welcome email is sent
/// in the background and never fails the request.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<CreateSubscriber>,
) -> AppResult<impl IntoResponse> {
    let new = new_subscriber(&input)?;

    let subscriber = SubscriberRepo::subscribe(&state.pool, &new)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "This email is already subscribed".to_string(),
            ))
        })?;

    tracing::info!(
        subscriber_id = subscriber.id,
        interests = ?subscriber.interests,
        "Subscriber added",
    );

    let newsletter = state.newsletter.clone();
    let welcome_to = subscriber.clone();
    tokio::spawn(async move {
        if let Err(e) = newsletter.send_welcome(&welcome_to).await {
            tracing::warn!(subscriber_id = welcome_to.id, error = %e, "Welcome email failed");
        }
    });

    Ok((StatusCode::CREATED, Json(DataResponse { data: subscriber })))
}

/// GET /api/v1/subscribers
pub async fn list_subscribers(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let subscribers = SubscriberRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: subscribers }))
}

/// PUT /api/v1/subscribers/{id}
pub async fn update_subscriber(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubscriber>,
) -> AppResult<impl IntoResponse> {
    let update = normalize_update(&input)?;

    let subscriber = SubscriberRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(subscriber_id = id, admin = %admin.email, "Subscriber updated");

    Ok(Json(DataResponse { data: subscriber }))
}

/// DELETE /api/v1/subscribers/{id}
pub async fn delete_subscriber(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SubscriberRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(subscriber_id = id, admin = %admin.email, "Subscriber deleted");

    Ok(Json(DataResponse {
        data: Deleted { success: true },
    }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn request(email: &str, interests: &[&str]) -> CreateSubscriber {
        CreateSubscriber {
            email: email.to_string(),
            name: None,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            location: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_new_subscriber_is_normalized() {
        let new = new_subscriber(&request(" Reader@Example.com", &["Teaching", "Blog"])).unwrap();
        assert_eq!(new.email, "reader@example.com");
        assert_eq!(new.name, "Anonymous");
        assert_eq!(new.interests, vec!["Teaching", "Blog"]);
        assert_eq!(new.location, None);
        assert_eq!(new.unsubscribe_token.len(), 32);
    }

    #[test]
    fn test_new_subscriber_requires_email_and_interest() {
        assert_matches!(
            new_subscriber(&request("nope", &["Blog"])),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            new_subscriber(&request("a@b.com", &[])),
            Err(CoreError::Validation(msg)) if msg == "Select at least one interest"
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = new_subscriber(&request("a@b.com", &["Blog"])).unwrap();
        let b = new_subscriber(&request("a@b.com", &["Blog"])).unwrap();
        assert_ne!(a.unsubscribe_token, b.unsubscribe_token);
    }

    #[test]
    fn test_update_normalizes_present_fields() {
        let update = normalize_update(&UpdateSubscriber {
            email: Some(" NEW@Example.com ".into()),
            interests: Some(vec!["Blog".into()]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(update.email.as_deref(), Some("new@example.com"));
        assert_eq!(update.interests, Some(vec!["Blog".to_string()]));
        assert!(update.name.is_none());

        assert!(normalize_update(&UpdateSubscriber::default()).is_err());
        assert!(normalize_update(&UpdateSubscriber {
            interests: Some(vec!["Poetry".into()]),
            ..Default::default()
        })
        .is_err());
    }
}
