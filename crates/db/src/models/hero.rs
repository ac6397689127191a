//! Hero banner configuration models.

use std::collections::BTreeMap;

use codetimes_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of `hero_settings`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSettings {
    pub image: String,
    pub updated_at: Timestamp,
}

/// A row from `hero_page_copy`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HeroPageCopy {
    pub page: String,
    pub subtitle: String,
    pub bio: String,
}

/// Full hero configuration: shared image plus per-page copy keyed by page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroConfig {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub subtitles: BTreeMap<String, String>,
    #[serde(default)]
    pub bios: BTreeMap<String, String>,
}

impl HeroConfig {
    /// Merge subtitle and bio maps into one row per page.
    pub fn page_rows(&self) -> Vec<HeroPageCopy> {
        let mut pages: Vec<&String> = self.subtitles.keys().chain(self.bios.keys()).collect();
        pages.sort();
        pages.dedup();
        pages
            .into_iter()
            .map(|page| HeroPageCopy {
                page: page.clone(),
                subtitle: self.subtitles.get(page).cloned().unwrap_or_default(),
                bio: self.bios.get(page).cloned().unwrap_or_default(),
            })
            .collect()
    }
}
