//! Repository for the `subscribers` table.

use codetimes_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscriber::{NewSubscriber, Subscriber, UpdateSubscriber};

const COLUMNS: &str = "id, email, name, interests, location, unsubscribe_token, \
                       subscribed_at, unsubscribed_at";

/// Provides subscription lifecycle operations.
pub struct SubscriberRepo;

impl SubscriberRepo {
    /// Insert a subscriber, or reactivate one that previously unsubscribed.
    ///
    /// Returns `None` when the email already belongs to an active
    /// subscriber; the existing row is left untouched.
    pub async fn subscribe(
        pool: &PgPool,
        input: &NewSubscriber,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscribers (email, name, interests, location, unsubscribe_token)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (email) DO UPDATE SET
                name = EXCLUDED.name,
                interests = EXCLUDED.interests,
                location = EXCLUDED.location,
                subscribed_at = NOW(),
                unsubscribed_at = NULL
             WHERE subscribers.unsubscribed_at IS NOT NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.interests)
            .bind(&input.location)
            .bind(&input.unsubscribe_token)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscribers WHERE id = $1");
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lookup by normalized (lowercase) email.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscribers WHERE email = $1");
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Every subscriber, active or not, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Subscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscribers ORDER BY subscribed_at DESC, id DESC");
        sqlx::query_as::<_, Subscriber>(&query).fetch_all(pool).await
    }

    /// Active subscribers whose interests overlap `tags`.
    pub async fn list_active_with_interests(
        pool: &PgPool,
        tags: &[String],
    ) -> Result<Vec<Subscriber>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscribers
             WHERE unsubscribed_at IS NULL AND interests && $1
             ORDER BY id"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(tags)
            .fetch_all(pool)
            .await
    }

    /// Admin edit. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubscriber,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!(
            "UPDATE subscribers SET
                email = COALESCE($2, email),
                name = COALESCE($3, name),
                interests = COALESCE($4, interests),
                location = COALESCE($5, location)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.interests)
            .bind(&input.location)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subscribers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Clear interests and stamp `unsubscribed_at` for the token's owner.
    ///
    /// Idempotent: an already-unsubscribed row keeps its original timestamp.
    pub async fn unsubscribe_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!(
            "UPDATE subscribers SET
                interests = '{{}}',
                unsubscribed_at = COALESCE(unsubscribed_at, NOW())
             WHERE unsubscribe_token = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    pub async fn unsubscribe_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!(
            "UPDATE subscribers SET
                interests = '{{}}',
                unsubscribed_at = COALESCE(unsubscribed_at, NOW())
             WHERE email = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
