use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers::{health, movies};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Assemble the full application router.
///
/// `/movies` sits behind the auth layer; `/health` is public. An outer
/// middleware answers any OPTIONS request with an empty 200 before routing
/// or auth get involved, mirroring the CORS preflight contract.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .route("/health", get(health::health))
        .fallback(not_found)
        .layer(middleware::from_fn(preflight))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Cross-origin policy: one configured origin, credentialed requests
/// allowed, explicit method and header lists.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Short-circuit OPTIONS on any path with an empty 200.
async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
