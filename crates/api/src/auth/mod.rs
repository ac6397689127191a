//! Authentication primitives for the single admin account.
//!
//! - [`password`] -- bcrypt hashing; verification also accepts argon2id PHC hashes.
//! - [`credentials`] -- the configured admin identity and the credential check.
//! - [`session`] -- HS256 session tokens carried in the `admin_session_token` cookie.
//! - [`throttle`] -- lockout after repeated sign-in failures.

pub mod credentials;
pub mod password;
pub mod session;
pub mod throttle;
