//! Aggregation gateway for the marketplace.
//!
//! Exposes one unified HTTP query/mutation surface and resolves each
//! request by fanning out to the account, catalog, and order backends
//! under per-call deadlines, translating all backend failures into a
//! closed error taxonomy.

pub mod adapters;
pub mod aggregator;
pub mod boundary;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use aggregator::Aggregator;

/// Creates the Axum application router with all routes and shared state.
///
/// `request_timeout` is the inbound budget; the aggregator's per-call
/// deadline must stay strictly inside it (see [`config::Config`]).
pub fn create_app(
    aggregator: Arc<Aggregator>,
    metrics_handle: PrometheusHandle,
    request_timeout: Duration,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/accounts", post(routes::accounts::create))
        .route("/accounts", get(routes::accounts::list))
        .route("/accounts/{id}", get(routes::accounts::overview))
        .route("/accounts/{id}/orders", get(routes::accounts::orders))
        .route("/products", post(routes::products::create))
        .route("/products", get(routes::products::list))
        .route("/orders", post(routes::orders::create))
        .with_state(aggregator)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}
