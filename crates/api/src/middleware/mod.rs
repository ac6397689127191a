//! Request-level access control.
//!
//! - [`auth::SessionUser`] -- Extracts the signed-in user from the session cookie.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`host_gate::host_gate`] -- Host routing and the admin dashboard gate.

pub mod auth;
pub mod host_gate;
pub mod rbac;
