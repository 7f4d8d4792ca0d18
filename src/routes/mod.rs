//! HTTP route handlers.
//!
//! Two routes: the parameterized reachability test and a fallback greeting
//! for everything else. Both accept any method.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod greeting;
pub mod nettest;

use axum::{middleware, routing::any, Router};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NETTEST;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with both routes.
pub fn create_router(state: AppState) -> Router {
    // Reachability results describe one attempt at one instant, never cache
    let nettest_routes = Router::new()
        .route("/nettest/{host}/{port}", any(nettest::nettest))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NETTEST),
        ));

    Router::new()
        .merge(nettest_routes)
        .fallback(greeting::greeting)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
