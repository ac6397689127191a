use std::sync::Arc;

use codetimes_newsletter::Newsletter;

use crate::auth::throttle::LoginThrottle;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: codetimes_db::DbPool,
    /// Server configuration (hosts, session secret, admin identity).
    pub config: Arc<ServerConfig>,
    /// Outgoing newsletter email.
    pub newsletter: Arc<Newsletter>,
    /// Failed sign-in bookkeeping.
    pub throttle: Arc<LoginThrottle>,
}
