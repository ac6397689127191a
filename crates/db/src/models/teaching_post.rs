//! Teaching history entry model and DTOs.

use codetimes_core::interests::{normalize_tags, split_tag_string};
use codetimes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `teaching_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachingPost {
    pub id: DbId,
    pub title: String,
    pub school: String,
    pub year: String,
    /// Lecture, seminar, workshop, ...
    #[serde(rename = "type")]
    pub kind: String,
    pub is_current: bool,
    pub tags: Vec<String>,
    pub description: String,
    pub full_text: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub notified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Tags as sent by clients: either a JSON array or `"a, b, c"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagInput {
    List(Vec<String>),
    Csv(String),
}

impl TagInput {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagInput::List(list) => normalize_tags(list),
            TagInput::Csv(raw) => split_tag_string(&raw),
        }
    }
}

/// DTO for creating a teaching entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeachingPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub year: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub is_current: bool,
    pub tags: Option<TagInput>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub full_text: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

/// DTO for partially updating a teaching entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeachingPost {
    pub title: Option<String>,
    pub school: Option<String>,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub is_current: Option<bool>,
    pub tags: Option<TagInput>,
    pub description: Option<String>,
    pub full_text: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

impl UpdateTeachingPost {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.school.is_none()
            && self.year.is_none()
            && self.kind.is_none()
            && self.is_current.is_none()
            && self.tags.is_none()
            && self.description.is_none()
            && self.full_text.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}
