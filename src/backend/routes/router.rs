/**
 * Router Configuration
 *
 * Assembles the API routes, legacy redirects, optional static files and
 * the JSON 404 fallback (also used for known paths hit with an
 * unsupported method), then wraps everything in the HTTP layers.
 *
 * # Layers (outermost first)
 *
 * 1. `TraceLayer` - one span per request
 * 2. `CorsLayer` - configured origins, credentials allowed
 * 3. Security headers - `nosniff`, `SAMEORIGIN`, `no-referrer`
 * 4. `DefaultBodyLimit` - 10 MiB
 */

use std::path::PathBuf;

use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    handler::HandlerWithoutStateExt,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
        HeaderValue, Method, StatusCode,
    },
    response::Json,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::legacy_routes::configure_legacy_routes;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// HTTP surface settings that are not part of `AppState`
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
    /// Directory served for paths no route matches
    pub static_dir: Option<PathBuf>,
}

/// JSON 404 for unknown routes
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure(
            format!("Route not found - {}", uri.path()),
            None,
        )),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, options: &HttpOptions) -> Router<()> {
    let router = configure_api_routes(Router::new(), app_state.clone());
    // Must follow every route: only already registered paths get it
    let router = configure_legacy_routes(router).method_not_allowed_fallback(route_not_found);

    let router = match &options.static_dir {
        Some(dir) => {
            tracing::info!("Serving static files from {}", dir.display());
            router.fallback_service(ServeDir::new(dir).fallback(route_not_found.into_service()))
        }
        None => router.fallback(route_not_found),
    };

    router
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
