use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guildboard_api::config::ServerConfig;
use guildboard_api::router::build_app_router;
use guildboard_api::state::{build_source, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "guildboard_api=debug,guildboard_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let guild = &config.guild;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    tracing::info!(
        guild = %guild.guild_name,
        realm = %guild.realm_name,
        region = %guild.region,
        zone = guild.zone_id,
        difficulty = guild.difficulty,
        mock = guild.use_mock_data,
        "Loaded guild configuration",
    );
    if !guild.use_mock_data && (guild.client_id.is_none() || guild.client_secret.is_none()) {
        tracing::warn!(
            "Warcraft Logs credentials are not configured; leaderboard requests will fail"
        );
    }

    // --- Data source and cache ---
    let source = build_source(guild).expect("Failed to build Warcraft Logs client");
    let state = AppState::new(config.clone(), source);

    // --- Router ---
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
