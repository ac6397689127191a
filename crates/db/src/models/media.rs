//! Uploaded media model and DTOs.

use codetimes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    pub id: DbId,
    pub url: String,
    pub name: String,
    #[serde(rename = "size")]
    pub size_bytes: i64,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "uploaded")]
    pub uploaded_at: Timestamp,
}

/// DTO recording a file that finished uploading to the file host.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMedia {
    #[serde(default)]
    pub url: String,
    pub name: Option<String>,
    #[serde(default)]
    pub size: i64,
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
}
