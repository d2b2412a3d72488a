//! Gateway server entry point.

use std::sync::Arc;

use account::{AccountService, PgAccountStore};
use catalog::{CatalogService, PgProductStore};
use gateway::adapters::{LocalAccountDirectory, LocalOrderBackend, LocalProductCatalog};
use gateway::aggregator::Aggregator;
use gateway::config::Config;
use order::{OrderService, PgOrderStore};
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Load configuration and connect to storage
    let config = Config::from_env();
    let database_url = config
        .database_url
        .clone()
        .expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("failed to connect to database");

    let order_store = PgOrderStore::new(pool.clone());
    order_store
        .run_migrations()
        .await
        .expect("failed to run migrations");

    // 4. Wire the backends into one aggregator owning all handles
    let aggregator = Arc::new(
        Aggregator::new(
            Arc::new(LocalAccountDirectory::new(AccountService::new(
                PgAccountStore::new(pool.clone()),
            ))),
            Arc::new(LocalProductCatalog::new(CatalogService::new(
                PgProductStore::new(pool.clone()),
            ))),
            Arc::new(LocalOrderBackend::new(OrderService::new(order_store))),
        )
        .with_call_timeout(config.call_timeout),
    );

    // 5. Build the application
    let app = gateway::create_app(aggregator, metrics_handle, config.request_timeout);

    // 6. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting gateway");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
