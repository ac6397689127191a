//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Payload for successful deletes.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub success: bool,
}

/// Payload for actions that report a user-facing message.
#[derive(Debug, Serialize)]
pub struct Message {
    pub ok: bool,
    pub message: &'static str,
}
