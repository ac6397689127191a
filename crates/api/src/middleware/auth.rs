//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use codetimes_core::error::CoreError;
use codetimes_core::gate::SessionState;
use codetimes_core::roles::Role;

use crate::auth::session::read_session;
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in user extracted from the `admin_session_token` cookie.
///
/// ```ignore
/// async fn my_handler(user: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(subject = %user.subject, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The token's `sub` claim.
    pub subject: String,
    pub email: String,
    /// Decoded `role` claim.
    pub role: Role,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match read_session(&parts.headers, &state.config.session) {
            (SessionState::Valid(role), Some(claims)) => Ok(SessionUser {
                subject: claims.sub,
                email: claims.email,
                role,
            }),
            (SessionState::NoToken, _) => Err(AppError::Core(CoreError::Unauthorized(
                "Missing session".into(),
            ))),
            _ => Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or expired session".into(),
            ))),
        }
    }
}
