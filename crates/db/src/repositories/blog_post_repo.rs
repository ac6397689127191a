//! Repository for the `blog_posts` table.

use codetimes_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog_post::{BlogPost, CreateBlogPost, PostTitle, UpdateBlogPost};

const COLUMNS: &str = "id, title, author, summary, image, content, media_id, notified, \
                       created_at, updated_at";

/// Provides CRUD operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlogPost,
        author: &str,
    ) -> Result<BlogPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts (title, author, summary, image, content, media_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(input.title.trim())
            .bind(author)
            .bind(input.summary.trim())
            .bind(input.image.trim())
            .bind(&input.content)
            .bind(input.media_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all posts, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, BlogPost>(&query).fetch_all(pool).await
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                content = COALESCE($4, content),
                image = COALESCE($5, image),
                media_id = COALESCE($6, media_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.summary.as_deref().map(str::trim))
            .bind(&input.content)
            .bind(input.image.as_deref().map(str::trim))
            .bind(input.media_id)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Titles for the given ids, in id order. Unknown ids are skipped.
    pub async fn titles_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<PostTitle>, sqlx::Error> {
        sqlx::query_as::<_, PostTitle>(
            "SELECT id, title FROM blog_posts WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Posts no subscriber has been told about yet, oldest first.
    pub async fn list_unnotified(pool: &PgPool) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts WHERE notified = FALSE ORDER BY created_at, id"
        );
        sqlx::query_as::<_, BlogPost>(&query).fetch_all(pool).await
    }

    pub async fn mark_notified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE blog_posts SET notified = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
