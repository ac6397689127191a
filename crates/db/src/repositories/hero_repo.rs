//! Repository for `hero_settings` and `hero_page_copy`.

use sqlx::PgPool;

use crate::models::hero::{HeroConfig, HeroPageCopy, HeroSettings};

/// Reads and replaces the hero banner configuration.
pub struct HeroRepo;

impl HeroRepo {
    pub async fn settings(pool: &PgPool) -> Result<Option<HeroSettings>, sqlx::Error> {
        sqlx::query_as::<_, HeroSettings>("SELECT image, updated_at FROM hero_settings WHERE id = 1")
            .fetch_optional(pool)
            .await
    }

    pub async fn page_copy(pool: &PgPool, page: &str) -> Result<Option<HeroPageCopy>, sqlx::Error> {
        sqlx::query_as::<_, HeroPageCopy>(
            "SELECT page, subtitle, bio FROM hero_page_copy WHERE page = $1",
        )
        .bind(page)
        .fetch_optional(pool)
        .await
    }

    /// Full configuration, or `None` if it was never saved.
    pub async fn load(pool: &PgPool) -> Result<Option<HeroConfig>, sqlx::Error> {
        let Some(settings) = Self::settings(pool).await? else {
            return Ok(None);
        };
        let rows = sqlx::query_as::<_, HeroPageCopy>(
            "SELECT page, subtitle, bio FROM hero_page_copy ORDER BY page",
        )
        .fetch_all(pool)
        .await?;

        let mut config = HeroConfig {
            image: settings.image,
            ..Default::default()
        };
        for row in rows {
            config.subtitles.insert(row.page.clone(), row.subtitle);
            config.bios.insert(row.page, row.bio);
        }
        Ok(Some(config))
    }

    /// Replace the whole configuration in one transaction.
    ///
    /// Pages absent from `config` lose their stored copy.
    pub async fn replace(pool: &PgPool, config: &HeroConfig) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO hero_settings (id, image) VALUES (1, $1)
             ON CONFLICT (id) DO UPDATE SET image = EXCLUDED.image, updated_at = NOW()",
        )
        .bind(config.image.trim())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM hero_page_copy")
            .execute(&mut *tx)
            .await?;

        for row in config.page_rows() {
            sqlx::query("INSERT INTO hero_page_copy (page, subtitle, bio) VALUES ($1, $2, $3)")
                .bind(&row.page)
                .bind(&row.subtitle)
                .bind(&row.bio)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await
    }
}
