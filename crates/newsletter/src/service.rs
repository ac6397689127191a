//! Newsletter sends: welcome, digest and new-post notifications.

use std::sync::Arc;

use codetimes_core::digest::{batch_recipients, content_url, DigestItem, BATCH_SIZE};
use codetimes_core::error::CoreError;
use codetimes_core::interests::{parse_interests, to_tags, Interest};
use codetimes_core::types::DbId;
use codetimes_db::models::blog_post::PostTitle;
use codetimes_db::models::subscriber::Subscriber;
use codetimes_db::repositories::{BlogPostRepo, SubscriberRepo, TeachingPostRepo};
use codetimes_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::config::MailConfig;
use crate::mailer::{MailError, Mailer, OutgoingEmail};
use crate::templates::{self, DigestContent, Rendered};

/// Error type for newsletter operations that touch the database.
#[derive(Debug, thiserror::Error)]
pub enum NewsletterError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Email delivery failed: {0}")]
    Delivery(#[from] MailError),
}

/// Outcome of a (possibly batched) send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SendReport {
    /// Recipients in batches the transport accepted.
    pub sent: usize,
    /// Recipients in batches the transport rejected.
    pub failed: usize,
    /// `true` when no transport is configured and nothing was attempted.
    pub skipped: bool,
}

impl SendReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }

    /// Every attempted batch failed.
    pub fn all_failed(&self) -> bool {
        self.failed > 0 && self.sent == 0
    }
}

/// Result of one notification pass over a content kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NotifyOutcome {
    /// Posts that were pending at the start of the pass.
    pub pending: usize,
    /// Posts marked notified during the pass.
    pub notified: usize,
    /// Total recipients emailed across all posts.
    pub recipients: usize,
    pub skipped: bool,
}

/// Admin request for a hand-assembled digest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub intro_message: String,
    pub period_label: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub blog_ids: Vec<DbId>,
    #[serde(default)]
    pub teaching_ids: Vec<DbId>,
}

impl DigestRequest {
    /// Check required fields and return the selected audience.
    pub fn validate(&self) -> Result<Vec<Interest>, CoreError> {
        if self.subject.trim().is_empty() {
            return Err(CoreError::Validation("Subject is required".to_string()));
        }
        if self.intro_message.trim().is_empty() {
            return Err(CoreError::Validation("Message is required".to_string()));
        }
        if self.interests.is_empty() {
            return Err(CoreError::Validation(
                "Select at least one audience".to_string(),
            ));
        }
        let interests = parse_interests(&self.interests)?;
        if self.blog_ids.is_empty() && self.teaching_ids.is_empty() {
            return Err(CoreError::Validation(
                "Select at least one blog or teaching item".to_string(),
            ));
        }
        Ok(interests)
    }
}

/// Sender for every newsletter email.
///
/// Holds an optional transport: with none configured every send reports
/// `skipped` instead of failing.
pub struct Newsletter {
    mailer: Option<Arc<dyn Mailer>>,
    from: String,
    reply_to: Option<String>,
    site_url: String,
}

impl Newsletter {
    pub fn new(config: &MailConfig, mailer: Option<Arc<dyn Mailer>>) -> Self {
        Self {
            mailer,
            from: config.from.clone(),
            reply_to: config.reply_to.clone(),
            site_url: config.site_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build with the transport selected by `config`.
    pub fn from_config(config: &MailConfig) -> Self {
        Self::new(config, config.build_mailer())
    }

    pub fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Unsubscribe page, with the subscriber's token when the email is personal.
    pub fn unsubscribe_url(&self, token: Option<&str>) -> String {
        match token {
            Some(t) => format!("{}/unsubscribe?t={t}", self.site_url),
            None => format!("{}/unsubscribe", self.site_url),
        }
    }

    /// Send `rendered` to `recipients` in Bcc batches of [`BATCH_SIZE`].
    ///
    /// A failed batch is logged and counted; the remaining batches still go
    /// out.
    pub async fn send_batched(&self, recipients: &[String], rendered: &Rendered) -> SendReport {
        let Some(mailer) = &self.mailer else {
            tracing::warn!(subject = %rendered.subject, "Email skipped, no transport configured");
            return SendReport::skipped();
        };

        let mut report = SendReport::default();
        for (index, batch) in batch_recipients(recipients, BATCH_SIZE).into_iter().enumerate() {
            let email = OutgoingEmail {
                from: self.from.clone(),
                to: vec![self.from.clone()],
                bcc: batch,
                reply_to: self.reply_to.clone(),
                subject: rendered.subject.clone(),
                html: rendered.html.clone(),
                text: rendered.text.clone(),
            };
            match mailer.send(&email).await {
                Ok(()) => report.sent += email.bcc.len(),
                Err(e) => {
                    tracing::error!(
                        batch = index,
                        size = email.bcc.len(),
                        transport = mailer.name(),
                        error = %e,
                        "Email batch failed"
                    );
                    report.failed += email.bcc.len();
                }
            }
        }

        tracing::info!(
            subject = %rendered.subject,
            sent = report.sent,
            failed = report.failed,
            "Batched email send finished"
        );
        report
    }

    /// Welcome a new subscriber, with a personal unsubscribe link.
    pub async fn send_welcome(&self, subscriber: &Subscriber) -> Result<SendReport, MailError> {
        let Some(mailer) = &self.mailer else {
            return Ok(SendReport::skipped());
        };

        let rendered = templates::welcome(
            &subscriber.name,
            &self.site_url,
            &self.unsubscribe_url(Some(&subscriber.unsubscribe_token)),
        );
        let email = OutgoingEmail {
            from: self.from.clone(),
            to: vec![subscriber.email.clone()],
            bcc: Vec::new(),
            reply_to: self.reply_to.clone(),
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        };
        mailer.send(&email).await?;

        tracing::info!(subscriber_id = subscriber.id, "Welcome email sent");
        Ok(SendReport {
            sent: 1,
            ..Default::default()
        })
    }

    fn items(&self, kind: Interest, titles: Vec<PostTitle>) -> Vec<DigestItem> {
        titles
            .into_iter()
            .map(|t| DigestItem {
                url: content_url(&self.site_url, kind, t.id),
                title: t.title,
            })
            .collect()
    }

    /// Send a digest of the selected posts to every matching subscriber.
    pub async fn send_digest(
        &self,
        pool: &DbPool,
        request: &DigestRequest,
    ) -> Result<SendReport, NewsletterError> {
        let interests = request.validate()?;

        let audience =
            SubscriberRepo::list_active_with_interests(pool, &to_tags(&interests)).await?;
        if audience.is_empty() {
            return Err(CoreError::Validation(
                "No subscribers match the selected audience".to_string(),
            )
            .into());
        }

        let blog = match request.blog_ids.as_slice() {
            [] => Vec::new(),
            ids => self.items(Interest::Blog, BlogPostRepo::titles_by_ids(pool, ids).await?),
        };
        let teaching = match request.teaching_ids.as_slice() {
            [] => Vec::new(),
            ids => self.items(
                Interest::Teaching,
                TeachingPostRepo::titles_by_ids(pool, ids).await?,
            ),
        };

        let unsubscribe_url = self.unsubscribe_url(None);
        let rendered = templates::digest(&DigestContent {
            subject: request.subject.trim(),
            intro: request.intro_message.trim(),
            period_label: request.period_label.as_deref(),
            blog: &blog,
            teaching: &teaching,
            site_url: &self.site_url,
            unsubscribe_url: &unsubscribe_url,
        });

        let recipients: Vec<String> = audience.into_iter().map(|s| s.email).collect();
        Ok(self.send_batched(&recipients, &rendered).await)
    }

    /// Announce every post of `kind` not yet announced.
    ///
    /// Posts with no interested subscribers are marked notified right away.
    /// With no transport configured nothing is marked, so the posts go out
    /// once email is set up. A post whose batches all fail stays pending and
    /// is retried on the next pass.
    pub async fn notify_pending(
        &self,
        pool: &DbPool,
        kind: Interest,
    ) -> Result<NotifyOutcome, NewsletterError> {
        let pending: Vec<PostTitle> = match kind {
            Interest::Blog => BlogPostRepo::list_unnotified(pool)
                .await?
                .into_iter()
                .map(|p| PostTitle { id: p.id, title: p.title })
                .collect(),
            Interest::Teaching => TeachingPostRepo::list_unnotified(pool)
                .await?
                .into_iter()
                .map(|p| PostTitle { id: p.id, title: p.title })
                .collect(),
        };

        let mut outcome = NotifyOutcome {
            pending: pending.len(),
            ..Default::default()
        };
        if pending.is_empty() {
            return Ok(outcome);
        }
        if !self.is_enabled() {
            tracing::warn!(kind = %kind, pending = pending.len(), "Notifications skipped, no transport configured");
            outcome.skipped = true;
            return Ok(outcome);
        }

        let audience: Vec<String> =
            SubscriberRepo::list_active_with_interests(pool, &to_tags(&[kind]))
                .await?
                .into_iter()
                .map(|s| s.email)
                .collect();
        let unsubscribe_url = self.unsubscribe_url(None);

        for post in pending {
            if !audience.is_empty() {
                let rendered = templates::new_post(
                    kind,
                    &post.title,
                    &content_url(&self.site_url, kind, post.id),
                    &unsubscribe_url,
                );
                let report = self.send_batched(&audience, &rendered).await;
                if report.all_failed() {
                    tracing::warn!(kind = %kind, post_id = post.id, "Post left pending after failed send");
                    continue;
                }
                outcome.recipients += report.sent;
            }

            match kind {
                Interest::Blog => BlogPostRepo::mark_notified(pool, post.id).await?,
                Interest::Teaching => TeachingPostRepo::mark_notified(pool, post.id).await?,
            };
            outcome.notified += 1;
        }

        tracing::info!(
            kind = %kind,
            notified = outcome.notified,
            recipients = outcome.recipients,
            "New-post notifications processed"
        );
        Ok(outcome)
    }
}
