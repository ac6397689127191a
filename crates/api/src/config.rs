use codetimes_core::host::SiteHosts;

use crate::auth::credentials::AdminCredentials;
use crate::auth::session::SessionConfig;

const DEFAULT_MAIN_DOMAIN: &str = "drcodezenna.com";
const DEFAULT_ADMIN_DOMAIN: &str = "admin.drcodezenna.com";
const DEFAULT_SITE_AUTHOR: &str = "Dr Odera Ezenna";

/// Server configuration loaded from environment variables.
///
/// Secrets and the admin identity have no defaults; everything else falls
/// back to production values for the public site.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Main and admin hostnames plus the public scheme.
    pub sites: SiteHosts,
    /// Session token signing and cookie settings.
    pub session: SessionConfig,
    /// The single administrator allowed to sign in.
    pub admin: AdminCredentials,
    /// Byline stored on new blog posts.
    pub site_author: String,
    /// Period of the new-post notification scheduler (default: `3600`).
    pub notify_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAIN_DOMAIN`          | `drcodezenna.com`          |
    /// | `ADMIN_DOMAIN`         | `admin.drcodezenna.com`    |
    /// | `PUBLIC_SCHEME`        | `https`                    |
    /// | `SITE_AUTHOR`          | `Dr Odera Ezenna`          |
    /// | `NOTIFY_INTERVAL_SECS` | `3600`                     |
    ///
    /// See [`SessionConfig::from_env`] and [`AdminCredentials::from_env`]
    /// for the required secrets.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let sites = SiteHosts::new(
            &std::env::var("MAIN_DOMAIN").unwrap_or_else(|_| DEFAULT_MAIN_DOMAIN.into()),
            &std::env::var("ADMIN_DOMAIN").unwrap_or_else(|_| DEFAULT_ADMIN_DOMAIN.into()),
            &std::env::var("PUBLIC_SCHEME").unwrap_or_else(|_| "https".into()),
        );
        assert!(
            sites.scheme == "https" || sites.scheme == "http",
            "PUBLIC_SCHEME must be http or https"
        );

        let notify_interval_secs: u64 = std::env::var("NOTIFY_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("NOTIFY_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            sites,
            session: SessionConfig::from_env(),
            admin: AdminCredentials::from_env(),
            site_author: std::env::var("SITE_AUTHOR")
                .unwrap_or_else(|_| DEFAULT_SITE_AUTHOR.into()),
            notify_interval_secs,
        }
    }
}
