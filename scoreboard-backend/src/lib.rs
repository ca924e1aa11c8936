pub mod config;
mod error;
mod routes;
pub mod validation;

use axum::{
    Router,
    http::StatusCode,
    routing::get,
};
use scoreboard_store::Store;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::ErrorResponse;

pub struct AppState {
    pub store: Store,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests per second for player endpoints
    pub per_sec: u64,
    /// Burst size for player endpoints
    pub burst: u32,
}

/// Create the application router around the given store.
///
/// `rate_limit: None` leaves the player endpoints unthrottled. Rate limiting
/// keys on the client IP, so the router must then be served with connect info.
pub fn create_app(
    store: Store,
    request_body_limit: usize,
    request_timeout: Duration,
    rate_limit: Option<RateLimitConfig>,
) -> Router {
    let state = Arc::new(AppState { store });

    let mut player_routes = Router::new()
        .route(
            "/player",
            get(routes::list_players).post(routes::create_player),
        )
        .route("/player/random", get(routes::random_player))
        .route("/player/rank/{rank}", get(routes::player_by_rank))
        .route(
            "/player/{id}",
            get(routes::get_player)
                .put(routes::update_player)
                .delete(routes::delete_player),
        );

    if let Some(rate_limit) = rate_limit {
        let governor = GovernorConfigBuilder::default()
            .period(Duration::from_nanos(1_000_000_000 / rate_limit.per_sec.max(1)))
            .burst_size(rate_limit.burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish();

        match governor {
            Some(governor) => {
                player_routes = player_routes.layer(GovernorLayer::new(governor));
            }
            None => tracing::warn!(?rate_limit, "Invalid rate limit, serving unthrottled"),
        }
    }

    Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .merge(player_routes)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(RequestBodyLimitLayer::new(request_body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
