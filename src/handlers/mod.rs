//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod envelope;
pub mod health;
pub mod hookup;

use axum::{middleware, Router};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
};

use crate::{
    middleware::{logging_middleware, REQUEST_ID_HEADER},
    state::AppState,
};

/// Build the application router
///
/// API routes are mounted under the configured base path, stored photos
/// under the configured public path, health checks at the root.
pub fn router(state: AppState) -> Router {
    let base_path = state.config().server.base_path.clone();
    let public_path = state.config().storage.public_path.clone();
    let photos = ServeDir::new(&state.config().storage.hookups_dir);

    let api = hookup::routes(&state);
    let app = if base_path == "/" {
        Router::new().merge(api)
    } else {
        Router::new().nest(&base_path, api)
    };

    // Layers apply bottom-up: the ID is set first, then logged, then echoed
    app.merge(health::routes())
        .nest_service(&public_path, photos)
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .with_state(state)
}
