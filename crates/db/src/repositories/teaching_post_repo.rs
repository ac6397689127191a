//! Repository for the `teaching_posts` table.

use codetimes_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog_post::PostTitle;
use crate::models::teaching_post::{CreateTeachingPost, TeachingPost, UpdateTeachingPost};

const COLUMNS: &str = "id, title, school, year, kind, is_current, tags, description, full_text, \
                       start_date, end_date, notified, created_at, updated_at";

/// Provides CRUD operations for teaching entries.
pub struct TeachingPostRepo;

impl TeachingPostRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTeachingPost,
    ) -> Result<TeachingPost, sqlx::Error> {
        let tags: Vec<String> = input.tags.clone().map(|t| t.into_tags()).unwrap_or_default();
        let query = format!(
            "INSERT INTO teaching_posts
                (title, school, year, kind, is_current, tags, description, full_text,
                 start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeachingPost>(&query)
            .bind(input.title.trim())
            .bind(input.school.trim())
            .bind(input.year.trim())
            .bind(input.kind.trim())
            .bind(input.is_current)
            .bind(&tags)
            .bind(&input.description)
            .bind(&input.full_text)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TeachingPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teaching_posts WHERE id = $1");
        sqlx::query_as::<_, TeachingPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Current positions first, then newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<TeachingPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teaching_posts
             ORDER BY is_current DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TeachingPost>(&query).fetch_all(pool).await
    }

    /// Update an entry. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeachingPost,
    ) -> Result<Option<TeachingPost>, sqlx::Error> {
        let tags: Option<Vec<String>> = input.tags.clone().map(|t| t.into_tags());
        let query = format!(
            "UPDATE teaching_posts SET
                title = COALESCE($2, title),
                school = COALESCE($3, school),
                year = COALESCE($4, year),
                kind = COALESCE($5, kind),
                is_current = COALESCE($6, is_current),
                tags = COALESCE($7, tags),
                description = COALESCE($8, description),
                full_text = COALESCE($9, full_text),
                start_date = COALESCE($10, start_date),
                end_date = COALESCE($11, end_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeachingPost>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.school.as_deref().map(str::trim))
            .bind(input.year.as_deref().map(str::trim))
            .bind(input.kind.as_deref().map(str::trim))
            .bind(input.is_current)
            .bind(tags)
            .bind(&input.description)
            .bind(&input.full_text)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teaching_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn titles_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<PostTitle>, sqlx::Error> {
        sqlx::query_as::<_, PostTitle>(
            "SELECT id, title FROM teaching_posts WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    pub async fn list_unnotified(pool: &PgPool) -> Result<Vec<TeachingPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teaching_posts WHERE notified = FALSE ORDER BY created_at, id"
        );
        sqlx::query_as::<_, TeachingPost>(&query).fetch_all(pool).await
    }

    pub async fn mark_notified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE teaching_posts SET notified = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
