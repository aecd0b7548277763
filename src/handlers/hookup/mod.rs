//! Hookup round handlers

mod handler;
pub mod request;

#[cfg(test)]
mod tests;

pub use handler::*;
pub use request::*;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::{
    constants::{roles, MULTIPART_OVERHEAD_BYTES},
    middleware::{auth_middleware, require_role, RequiredRole},
    state::AppState,
};

/// Hookup routes
///
/// Gates are attached per route. Layers run outermost-first, so the
/// last `.layer` call on a route is the first gate a request meets.
pub fn routes(state: &AppState) -> Router<AppState> {
    let authenticate = || middleware::from_fn_with_state(state.clone(), auth_middleware);
    let admin_only = || middleware::from_fn_with_state(RequiredRole(roles::ADMIN), require_role);
    let upload_limit =
        DefaultBodyLimit::max(state.config().storage.max_image_bytes + MULTIPART_OVERHEAD_BYTES);

    let mut router = Router::new();

    // The collection answers with and without the trailing slash
    for path in ["/hookup", "/hookup/"] {
        router = router
            .route(path, post(handler::create).layer(admin_only()).layer(authenticate()))
            .route(path, get(handler::get_all).layer(authenticate()));
    }

    router
        .route("/hookup/active", get(handler::get_active).layer(authenticate()))
        .route(
            "/hookup/last_winners",
            get(handler::get_last_winners).layer(authenticate()),
        )
        .route("/hookup/all_winners", get(handler::get_all_winners))
        .route(
            "/hookup/{id}/submit",
            patch(handler::submit_photo)
                .layer(upload_limit)
                .layer(authenticate()),
        )
        .route(
            "/hookup/{id}",
            patch(handler::update_winner)
                .layer(admin_only())
                .layer(authenticate()),
        )
        .route(
            "/hookup/{id}",
            put(handler::set_status)
                .layer(admin_only())
                .layer(authenticate()),
        )
}
