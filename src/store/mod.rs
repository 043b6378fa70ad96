pub mod movies;

pub use movies::{Movie, MovieStore, PgMovieStore};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

/// Errors surfaced by the movie store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Query error: {0}")]
    Query(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Open a connection pool and confirm the store is actually reachable.
///
/// Runs once at startup; an unreachable store aborts the process rather
/// than serving requests that can only fail.
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}
