use adapter::{
    database::{connect_database_with_retry, ConnectionPool},
    repository::memory::InMemoryStore,
};
use anyhow::{Context, Result};
use api::route::v1;
use axum::Router;
use kernel::model::catalog::Catalog;
use registry::AppRegistry;
use shared::config::{AppConfig, StorageBackend};
use shared::env::{which, Environment};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;

    // Postgres を使う場合はシャットダウン時に接続を閉じるためプールを保持しておく
    let (registry, pool) = match app_config.storage {
        StorageBackend::Postgres => {
            let pool = connect_database_with_retry(&app_config.database)
                .await
                .context("Could not connect to database")?;
            pool.migrate().await.context("Failed to migrate database")?;
            (AppRegistry::new(pool.clone()), Some(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; reservations are lost on restart");
            (AppRegistry::in_memory(InMemoryStore::new()), None)
        }
    };

    seed_catalog(&registry).await?;

    let app = Router::new()
        .merge(v1::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let addr = SocketAddr::new(app_config.server.host, app_config.server.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,error.message = %e, "Unexpected error"
            )
        });

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    served
}

async fn seed_catalog(registry: &AppRegistry) -> Result<()> {
    let catalog = Catalog::studio();
    let inserted = registry
        .catalog_repository()
        .ensure_seeded(&catalog.resources, &catalog.time_slots)
        .await
        .context("Failed to seed catalog")?;
    tracing::info!(inserted, "Catalog seeded");
    Ok(())
}

async fn close_pool(pool: ConnectionPool) {
    pool.close().await;
    tracing::info!("Database connections closed");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error.message = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error.message = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
