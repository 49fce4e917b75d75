//! api - HTTP surface over the menu service
//!
//! # Routes
//!
//! Public:
//! - `GET  /health`
//! - `POST /api/auth/login`
//! - `GET  /api/auth/validate`
//!
//! Bearer-guarded:
//! - `GET  /api/menu`
//! - `GET|POST /api/categories`, `GET|PUT|DELETE /api/categories/{id}`
//! - `GET  /api/dishes`
//! - `GET|POST /api/categories/{id}/dishes`
//! - `GET|PUT|DELETE /api/categories/{id}/dishes/{dish_id}`
//! - `PATCH /api/categories/{id}/dishes/{dish_id}/availability`
//! - `PATCH /api/categories/{id}/dishes/{dish_id}/price`
//! - `POST /api/sync`, `GET /api/sync/status`
//!
//! # Architecture
//!
//! Handlers are thin: parse the path id, hop to the blocking pool, run one
//! service call, map the result. The domain service is synchronous;
//! [`blocking`] is the only bridge between the async runtime and it.
//!
//! Errors become `{ "error": <code>, "message": <text> }` bodies via
//! [`error::ApiError`].

pub mod auth;
pub mod categories;
pub mod dishes;
pub mod error;
pub mod health;
pub mod menu;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use state::AppState;

use axum::http::HeaderValue;
use axum::middleware;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::core::types::MenuId;

/// Build the application router.
///
/// An empty `allowed_origins` list leaves CORS permissive, which suits
/// local development; production deployments list their admin origins.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    let protected = Router::new()
        .merge(menu::router())
        .merge(categories::router())
        .merge(dishes::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Run a synchronous service call on the blocking pool.
///
/// Blocking tasks run to completion even when the request future is
/// dropped, so a cancelled request can never abandon a half-finished
/// repository transaction.
pub(crate) async fn blocking<T, E, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(Into::into),
        Err(e) => Err(ApiError::Internal(format!("blocking task failed: {e}"))),
    }
}

/// Parse a path segment as a menu id, rejecting bad ones with a 400.
pub(crate) fn parse_id(raw: &str) -> Result<MenuId, ApiError> {
    MenuId::new(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}
