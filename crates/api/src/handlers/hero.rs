//! Handlers for the hero banner configuration.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use codetimes_core::error::CoreError;
use codetimes_core::hero::resolve_copy;
use codetimes_core::validation::require_text;
use codetimes_db::models::hero::HeroConfig;
use codetimes_db::repositories::HeroRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HeroQuery {
    pub page: Option<String>,
}

/// Resolved hero content for one page.
#[derive(Debug, Serialize)]
pub struct PageHero {
    pub image: String,
    pub subtitle: String,
    pub bio: String,
}

fn validate(config: &HeroConfig) -> Result<(), CoreError> {
    require_text("Image", &config.image)?;
    let blank_key = config
        .subtitles
        .keys()
        .chain(config.bios.keys())
        .any(|page| page.trim().is_empty());
    if blank_key {
        return Err(CoreError::Validation("Page names must not be blank".to_string()));
    }
    Ok(())
}

/// GET /api/v1/hero[?page=<page>]
///
/// With `page`, returns that page's copy with built-in fallbacks applied.
/// Without it, returns the stored configuration as-is.
pub async fn get_hero(
    State(state): State<AppState>,
    Query(query): Query<HeroQuery>,
) -> AppResult<axum::response::Response> {
    let Some(page) = query.page.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()) else {
        let config = HeroRepo::load(&state.pool).await?.unwrap_or_default();
        return Ok(Json(DataResponse { data: config }).into_response());
    };

    let image = HeroRepo::settings(&state.pool)
        .await?
        .map(|s| s.image)
        .unwrap_or_default();
    let copy = HeroRepo::page_copy(&state.pool, &page).await?;
    let (subtitle, bio) = resolve_copy(
        &page,
        copy.as_ref().map(|c| c.subtitle.as_str()),
        copy.as_ref().map(|c| c.bio.as_str()),
    );

    Ok(Json(DataResponse {
        data: PageHero {
            image,
            subtitle,
            bio,
        },
    })
    .into_response())
}

/// POST /api/v1/hero
///
/// Replaces the image and every page's copy in one transaction.
pub async fn save_hero(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(config): Json<HeroConfig>,
) -> AppResult<impl IntoResponse> {
    validate(&config)?;

    HeroRepo::replace(&state.pool, &config).await?;

    tracing::info!(
        pages = config.page_rows().len(),
        admin = %admin.email,
        "Hero configuration saved",
    );

    Ok(Json(DataResponse { data: config }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_is_required() {
        assert!(validate(&HeroConfig::default()).is_err());
        let config = HeroConfig {
            image: "https://utfs.io/f/hero.jpg".into(),
            ..Default::default()
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_blank_page_keys_are_rejected() {
        let mut config = HeroConfig {
            image: "https://utfs.io/f/hero.jpg".into(),
            ..Default::default()
        };
        config.bios.insert(" ".into(), "orphan".into());
        assert!(validate(&config).is_err());
    }
}
