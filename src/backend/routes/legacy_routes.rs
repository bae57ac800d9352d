//! Redirects from the pre-`/api` paths still used by older clients
//!
//! `POST` and `PUT` use 307 so the method and body survive the redirect.

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Redirect},
    routing::post,
    Router,
};

use crate::backend::server::state::AppState;

async fn moved_profile() -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(LOCATION, "/api/auth/profile")])
}

pub fn configure_legacy_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/register",
            post(|| async { Redirect::temporary("/api/auth/register") }),
        )
        .route(
            "/login",
            post(|| async { Redirect::temporary("/api/auth/login") }),
        )
        .route(
            "/profile",
            axum::routing::get(moved_profile)
                .put(|| async { Redirect::temporary("/api/auth/profile") }),
        )
}
