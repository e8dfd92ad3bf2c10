//! Brand/contact info and a fixed-window rate limited contact endpoint.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub mod brand;
pub mod clock;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod sweeper;

use handlers::{brand_handler, contact_handler, health_handler, metrics_handler};
use state::AppState;

// creating the router with routes; only the contact form is rate limited
pub fn router(state: Arc<AppState>) -> Router {
    let limited: Router<Arc<AppState>> = Router::new()
        .route("/api/contact", post(contact_handler))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/brand", get(brand_handler))
        .merge(limited)
        .with_state(state)
}
