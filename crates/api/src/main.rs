use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursepilot_api::config::ServerConfig;
use coursepilot_api::router::build_app_router;
use coursepilot_api::state::AppState;
use coursepilot_core::{CoursePilot, PilotPorts};
use coursepilot_db::{MoodleDb, MoodleStore, DEFAULT_PREFIX};
use coursepilot_moodle::{MoodleApi, MoodleConfig, MoodleCopier, MoodleEnrolments};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursepilot_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        default_lang = %config.default_lang,
        "Loaded server configuration",
    );

    // --- Moodle database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let prefix = std::env::var("MOODLE_DB_PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.into());

    let pool = coursepilot_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    coursepilot_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    let db = MoodleDb::new(pool.clone(), &prefix).expect("Invalid MOODLE_DB_PREFIX");

    // --- Moodle web services ---
    let moodle_config = MoodleConfig::from_env();
    let api = MoodleApi::new(&moodle_config).expect("Failed to build Moodle HTTP client");
    tracing::info!(url = %moodle_config.url, "Moodle web service client ready");

    // --- Course Pilot ---
    let store = Arc::new(MoodleStore::new(db.clone()));
    let pilot = CoursePilot::new(PilotPorts {
        config: store.clone(),
        catalog: store.clone(),
        capabilities: store.clone(),
        copier: Arc::new(MoodleCopier::new(api.clone())),
        restores: store,
        enrolments: Arc::new(MoodleEnrolments::new(api, db)),
    });

    // --- App state ---
    let state = AppState {
        pilot,
        pool: Some(pool),
        config: Arc::new(config.clone()),
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

    let (draining_tx, draining_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = draining_tx.send(());
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            result.expect("Server task panicked").expect("Server error");
        }
        Ok(()) = draining_rx => {
            let grace = Duration::from_secs(config.shutdown_timeout_secs);
            match tokio::time::timeout(grace, server).await {
                Ok(result) => result.expect("Server task panicked").expect("Server error"),
                Err(_) => tracing::warn!(
                    timeout_secs = config.shutdown_timeout_secs,
                    "In-flight requests did not drain in time",
                ),
            }
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
