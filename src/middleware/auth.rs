use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Verified caller identity, injected into request extensions by
/// `require_auth`. Visible to downstream handlers only, never to the client.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.id, email: claims.email }
    }
}

/// Authentication middleware for the protected routes.
///
/// A missing or empty Authorization header fails immediately with 401,
/// before the verifier is consulted. Otherwise the raw header value goes to
/// the token verifier; on success the verified identity is attached to the
/// request and the handler runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::unauthorized(AuthError::MissingCredential.to_string()))?
        .to_string();

    let claims = state.verifier.verify(&credential).map_err(|e| {
        tracing::debug!("token verification failed: {}", e);
        ApiError::unauthorized(e.to_string())
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}
