//! Newsletter subscriber model and DTOs.

use codetimes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subscribers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub interests: Vec<String>,
    pub location: Option<String>,
    /// Capability for one-click unsubscribe links. Never serialized.
    #[serde(skip_serializing)]
    pub unsubscribe_token: String,
    pub subscribed_at: Timestamp,
    pub unsubscribed_at: Option<Timestamp>,
}

impl Subscriber {
    pub fn is_active(&self) -> bool {
        self.unsubscribed_at.is_none()
    }
}

/// Subscribe request body as sent by the public form or the admin panel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriber {
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub location: Option<String>,
}

/// Validated insert for the repository.
#[derive(Debug, Clone)]
pub struct NewSubscriber {
    pub email: String,
    pub name: String,
    pub interests: Vec<String>,
    pub location: Option<String>,
    pub unsubscribe_token: String,
}

/// DTO for updating a subscriber. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriber {
    pub email: Option<String>,
    pub name: Option<String>,
    pub interests: Option<Vec<String>>,
    pub location: Option<String>,
}

impl UpdateSubscriber {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.interests.is_none()
            && self.location.is_none()
    }
}
