//! Blog post entity model and DTOs.

use codetimes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub image: String,
    pub content: String,
    pub media_id: Option<DbId>,
    pub notified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Just enough of a post to link to it from an email.
#[derive(Debug, Clone, FromRow)]
pub struct PostTitle {
    pub id: DbId,
    pub title: String,
}

/// DTO for creating a blog post. The author is supplied by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
    pub media_id: Option<DbId>,
}

/// DTO for partially updating a blog post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub media_id: Option<DbId>,
}

impl UpdateBlogPost {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.content.is_none()
            && self.image.is_none()
            && self.media_id.is_none()
    }
}
