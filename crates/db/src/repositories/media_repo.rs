//! Repository for the `media` table.

use sqlx::PgPool;

use crate::models::media::Media;

const COLUMNS: &str = "id, url, name, size_bytes, mime_type, uploaded_at";

/// Records files uploaded to the external file host.
pub struct MediaRepo;

impl MediaRepo {
    pub async fn find_by_url(pool: &PgPool, url: &str) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE url = $1");
        sqlx::query_as::<_, Media>(&query)
            .bind(url)
            .fetch_optional(pool)
            .await
    }

    /// Record an upload.
    ///
    /// A URL that is already recorded is returned unchanged with `false`.
    /// Otherwise the row is inserted and older rows with the same file name
    /// are removed, so a re-upload replaces its predecessor.
    pub async fn record_upload(
        pool: &PgPool,
        url: &str,
        name: &str,
        size_bytes: i64,
        mime_type: &str,
    ) -> Result<(Media, bool), sqlx::Error> {
        if let Some(existing) = Self::find_by_url(pool, url).await? {
            return Ok((existing, false));
        }

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO media (url, name, size_bytes, mime_type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let media = sqlx::query_as::<_, Media>(&query)
            .bind(url)
            .bind(name)
            .bind(size_bytes)
            .bind(mime_type)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM media WHERE name = $1 AND id <> $2")
            .bind(name)
            .bind(media.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((media, true))
    }

    /// Newest uploads first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media ORDER BY uploaded_at DESC, id DESC");
        sqlx::query_as::<_, Media>(&query).fetch_all(pool).await
    }
}
