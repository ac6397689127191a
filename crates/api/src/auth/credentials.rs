//! The configured administrator and the credential check.

use codetimes_core::roles::Role;
use codetimes_core::validation::normalize_email;

use super::password::verify_password;

/// Subject claim carried by admin session tokens.
pub const ADMIN_SUBJECT: &str = "admin";

/// Email and password hash of the only account allowed to sign in.
#[derive(Clone)]
pub struct AdminCredentials {
    /// Normalized (trimmed, lowercase) email.
    pub email: String,
    /// bcrypt or argon2id hash.
    pub password_hash: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

impl AdminCredentials {
    pub fn new(email: &str, password_hash: &str) -> Self {
        Self {
            email: normalize_email(email),
            password_hash: password_hash.trim().to_string(),
        }
    }

    /// Load the admin identity from environment variables.
    ///
    /// | Env Var               | Required |
    /// |-----------------------|----------|
    /// | `ADMIN_EMAIL`         | **yes**  |
    /// | `ADMIN_PASSWORD_HASH` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing or empty.
    pub fn from_env() -> Self {
        let email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set");
        let hash = std::env::var("ADMIN_PASSWORD_HASH").expect("ADMIN_PASSWORD_HASH must be set");
        assert!(!email.trim().is_empty(), "ADMIN_EMAIL must not be empty");
        assert!(!hash.trim().is_empty(), "ADMIN_PASSWORD_HASH must not be empty");
        Self::new(&email, &hash)
    }
}

/// Who a successful sign-in authenticated as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub subject: String,
    pub email: String,
    pub role: Role,
}

/// The one failure outcome of [`authenticate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Check an email/password pair against the configured admin.
///
/// The hash is verified even when the email does not match, so both failure
/// paths do the same work. Every failure, including an unreadable stored
/// hash, is reported as [`AuthError::InvalidCredentials`].
///
/// This is CPU-bound; async callers should run it on a blocking thread.
pub fn authenticate(
    admin: &AdminCredentials,
    email: &str,
    password: &str,
) -> Result<AdminIdentity, AuthError> {
    let email = normalize_email(email);
    let email_matches = !email.is_empty() && email == admin.email;

    let password_matches = match verify_password(password, &admin.password_hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!(error = %e, "Stored admin password hash is unreadable");
            false
        }
    };

    if email_matches && password_matches && !password.is_empty() {
        Ok(AdminIdentity {
            subject: ADMIN_SUBJECT.to_string(),
            email,
            role: Role::Admin,
        })
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::auth::password::hash_password;

    fn admin() -> AdminCredentials {
        AdminCredentials::new(" Admin@DrCodezenna.com ", &hash_password("s3cret!", 4).unwrap())
    }

    #[test]
    fn test_valid_credentials_yield_admin_identity() {
        let identity = authenticate(&admin(), "ADMIN@drcodezenna.com ", "s3cret!").unwrap();
        assert_eq!(identity.email, "admin@drcodezenna.com");
        assert_eq!(identity.subject, ADMIN_SUBJECT);
        assert!(identity.role.is_admin());
    }

    #[test]
    fn test_every_failure_is_the_same_error() {
        let admin = admin();
        assert_matches!(
            authenticate(&admin, "admin@drcodezenna.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        assert_matches!(
            authenticate(&admin, "someone@else.com", "s3cret!"),
            Err(AuthError::InvalidCredentials)
        );
        assert_matches!(authenticate(&admin, "", ""), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn test_unreadable_hash_is_invalid_credentials() {
        let broken = AdminCredentials::new("admin@drcodezenna.com", "plaintext");
        assert_matches!(
            authenticate(&broken, "admin@drcodezenna.com", "plaintext"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_debug_redacts_hash() {
        let rendered = format!("{:?}", admin());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("$2"));
    }
}
