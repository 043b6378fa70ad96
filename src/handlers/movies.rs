use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::store::Movie;

/// POST /movies request body. Only the name is client-supplied; the owner
/// comes from the verified token. Unknown fields, including a client-sent
/// user_id, are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    #[serde(default)]
    pub movie_name: String,
}

/// POST /movies - append a movie to the caller's list.
///
/// Responds with the caller's full list, newest first, rather than the
/// created record.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("rejected movie payload from user {}: {}", user.id, e);
        ApiError::bad_request("Invalid request payload")
    })?;

    if request.movie_name.is_empty() {
        return Err(ApiError::validation("Movie name cannot be empty"));
    }

    state.store.add_movie(user.id, &request.movie_name).await.map_err(|e| {
        tracing::error!("failed to insert movie for user {}: {}", user.id, e);
        ApiError::internal("Failed to add movie")
    })?;

    movies_for(&state, &user).await
}

/// GET /movies - the caller's movies, newest first.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    movies_for(&state, &user).await
}

async fn movies_for(state: &AppState, user: &AuthUser) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.store.movies_for_user(user.id).await.map_err(|e| {
        tracing::error!("failed to list movies for user {}: {}", user.id, e);
        ApiError::internal("Failed to retrieve movies")
    })?;

    Ok(Json(movies))
}
