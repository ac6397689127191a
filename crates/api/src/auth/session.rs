//! Admin session tokens.
//!
//! A session is an HS256-signed JWT holding [`Claims`], stored in the
//! host-only `admin_session_token` cookie. Decoding never fails loudly:
//! [`read_session`] folds every problem into [`SessionState::Invalid`].

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use codetimes_core::gate::SessionState;
use codetimes_core::roles::Role;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::credentials::AdminIdentity;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "admin_session_token";

/// Default session lifetime: one hour.
const DEFAULT_TTL_SECS: i64 = 3600;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    /// Absent on tokens minted without a role; such tokens never pass the gate.
    /// A non-string claim decodes as absent.
    #[serde(
        default,
        deserialize_with = "lenient_role",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(role)) => Ok(Some(role)),
        _ => Ok(None),
    }
}

/// Configuration for session token signing and the session cookie.
#[derive(Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token and cookie lifetime in seconds.
    pub ttl_secs: i64,
    /// Set the cookie's `Secure` attribute (off only in development).
    pub secure_cookie: bool,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var            | Required | Default      |
    /// |--------------------|----------|--------------|
    /// | `SESSION_SECRET`   | **yes**  | --           |
    /// | `SESSION_TTL_SECS` | no       | `3600`       |
    /// | `APP_ENV`          | no       | `production` |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let ttl_secs: i64 = std::env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_TTL_SECS.to_string())
            .parse()
            .expect("SESSION_TTL_SECS must be a valid i64");
        assert!(ttl_secs > 0, "SESSION_TTL_SECS must be positive");

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "production".into());

        Self {
            secret,
            ttl_secs,
            secure_cookie: app_env != "development",
        }
    }
}

/// Generate a session token for an authenticated identity.
pub fn issue_token(
    identity: &AdminIdentity,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: identity.subject.clone(),
        email: identity.email.clone(),
        role: identity.role.as_claim().map(str::to_string),
        exp: now + config.ttl_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token.
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Decode the session cookie on a request into what the gate needs.
pub fn read_session(headers: &HeaderMap, config: &SessionConfig) -> (SessionState, Option<Claims>) {
    let jar = CookieJar::from_headers(headers);
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return (SessionState::NoToken, None);
    };
    if cookie.value().is_empty() {
        return (SessionState::NoToken, None);
    }

    match validate_token(cookie.value(), config) {
        Ok(claims) => (
            SessionState::Valid(Role::from_claim(claims.role.as_deref())),
            Some(claims),
        ),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session token");
            (SessionState::Invalid, None)
        }
    }
}

/// The cookie set after a successful sign-in.
pub fn session_cookie(token: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .max_age(time::Duration::seconds(config.ttl_secs))
        .build()
}

/// A cookie matching [`session_cookie`]'s path, for removal on sign-out.
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .build()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            ttl_secs: 3600,
            secure_cookie: true,
        }
    }

    fn identity() -> AdminIdentity {
        AdminIdentity {
            subject: "admin".into(),
            email: "admin@drcodezenna.com".into(),
            role: Role::Admin,
        }
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={token}")).unwrap(),
        );
        headers
    }

    fn mint(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let config = test_config();
        let token = issue_token(&identity(), &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_read_session_states() {
        let config = test_config();
        assert_matches!(
            read_session(&HeaderMap::new(), &config).0,
            SessionState::NoToken
        );

        let token = issue_token(&identity(), &config).unwrap();
        assert_eq!(
            read_session(&headers_with(&token), &config).0,
            SessionState::Valid(Role::Admin)
        );

        assert_eq!(
            read_session(&headers_with("garbage"), &config).0,
            SessionState::Invalid
        );
    }

    #[test]
    fn test_expired_and_foreign_tokens_are_invalid() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let expired = Claims {
            sub: "admin".into(),
            email: String::new(),
            role: Some("admin".into()),
            exp: now - 300, // well past the default leeway
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = mint(&expired, &config.secret);
        assert_eq!(
            read_session(&headers_with(&token), &config).0,
            SessionState::Invalid
        );

        let fresh = Claims {
            exp: now + 300,
            ..expired
        };
        let foreign = mint(&fresh, "some-other-secret");
        assert_eq!(
            read_session(&headers_with(&foreign), &config).0,
            SessionState::Invalid
        );
    }

    #[test]
    fn test_missing_role_claim_decodes_as_missing() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let token = mint(
            &Claims {
                sub: "someone".into(),
                email: String::new(),
                role: None,
                exp: now + 300,
                iat: now,
                jti: "x".into(),
            },
            &config.secret,
        );
        assert_eq!(
            read_session(&headers_with(&token), &config).0,
            SessionState::Valid(Role::Missing)
        );
    }

    #[test]
    fn test_non_string_role_claim_decodes_as_missing() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        for role in [
            serde_json::json!(7),
            serde_json::json!(["admin"]),
            serde_json::json!({"name": "admin"}),
            serde_json::Value::Null,
        ] {
            let claims = serde_json::json!({
                "sub": "someone",
                "email": "a@b.c",
                "role": role,
                "exp": now + 300,
                "iat": now,
                "jti": "j",
            });
            let token = encode(
                &Header::default(),
                &claims,
                &EncodingKey::from_secret(config.secret.as_bytes()),
            )
            .unwrap();
            assert_eq!(
                read_session(&headers_with(&token), &config).0,
                SessionState::Valid(Role::Missing),
                "role claim {role}"
            );
        }
    }

    #[test]
    fn test_cookie_attributes() {
        let config = test_config();
        let cookie = session_cookie("abc".into(), &config);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert!(cookie.domain().is_none());
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));

        let dev = SessionConfig {
            secure_cookie: false,
            ..config
        };
        assert_eq!(session_cookie("abc".into(), &dev).secure(), Some(false));
    }
}
