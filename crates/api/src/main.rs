use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use codetimes_api::auth::throttle::LoginThrottle;
use codetimes_api::config::ServerConfig;
use codetimes_api::router::build_app_router;
use codetimes_api::state::AppState;
use codetimes_newsletter::{MailConfig, Newsletter, NotifyScheduler};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "codetimes_api=debug,codetimes_newsletter=info,tower_http=debug".into()
    });
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        main_domain = %config.sites.main_domain,
        admin_domain = %config.sites.admin_domain,
        "Loaded server configuration",
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = codetimes_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    codetimes_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    codetimes_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // --- Newsletter ---
    let mail_config = MailConfig::from_env();
    let newsletter = Arc::new(Newsletter::from_config(&mail_config));
    tracing::info!(enabled = newsletter.is_enabled(), "Newsletter sender ready");

    // Spawn the new-post notification scheduler.
    let notify_cancel = CancellationToken::new();
    let notify_scheduler = NotifyScheduler::new(
        pool.clone(),
        Arc::clone(&newsletter),
        Duration::from_secs(config.notify_interval_secs),
    );
    let notify_cancel_clone = notify_cancel.clone();
    let notify_handle = tokio::spawn(async move {
        notify_scheduler.run(notify_cancel_clone).await;
    });

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        newsletter,
        throttle: Arc::new(LoginThrottle::default()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    notify_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), notify_handle).await;
    tracing::info!("Notification scheduler stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
