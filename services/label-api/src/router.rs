//! HTTP router and middleware stack

use axum::error_handling::HandleErrorLayer;
use axum::routing::get;
use axum::{BoxError, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    let api = Router::new()
        // Catalog routes (admin only)
        .route(
            "/artists",
            get(handlers::list_artists).post(handlers::create_artist),
        )
        .route(
            "/artists/{id}",
            get(handlers::get_artist)
                .put(handlers::update_artist)
                .delete(handlers::delete_artist),
        )
        .route("/artists/{id}/albums", get(handlers::get_artist_albums))
        .route(
            "/albums",
            get(handlers::list_albums).post(handlers::create_album),
        )
        .route(
            "/albums/{id}",
            get(handlers::get_album)
                .put(handlers::update_album)
                .delete(handlers::delete_album),
        )
        // Auth routes (static segments take precedence over {provider})
        .route("/auth/me", get(handlers::me))
        .route("/auth/is-admin", get(handlers::is_admin))
        .route("/auth/callback", get(handlers::callback))
        .route("/auth/{provider}", get(handlers::auth_action));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        // Request ID propagation (outermost)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        // Tracing with request details
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Request timeout (innermost - closest to handler), answered as `{error}`
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .nest("/api", api)
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Upstream("request timed out".to_string())
    } else {
        ApiError::Internal(format!("unhandled middleware error: {err}"))
    }
}
