use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::handlers::checkin;
use crate::middleware::request_log::log_request;

pub fn create_router() -> Router {
    Router::new()
        .route("/checkin", post(checkin::receive_check_in))
        .route("/health", get(checkin::health))
}

/// The receiver as served: routes plus tracing, CORS, per-IP rate limiting
/// and request logging.
///
/// Needs `ConnectInfo<SocketAddr>` on every request, so serve it with
/// `into_make_service_with_connect_info`.
pub fn create_app(config: &Config) -> AppResult<Router> {
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit_period_secs)
            .burst_size(config.rate_limit_burst)
            .finish()
            .ok_or_else(|| AppError::Config("Invalid rate limit configuration".to_string()))?,
    );

    // Request logging sits outside the governor so rejections are logged too
    Ok(create_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(GovernorLayer::new(governor_config))
        .layer(middleware::from_fn(log_request)))
}
