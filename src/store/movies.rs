use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::StoreError;

/// A single watchlist entry.
///
/// `user_id` is the verified token subject of the caller that created the
/// row, never client-supplied input.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Movie {
    pub id: i32,
    pub user_id: i32,
    pub movie_name: String,
}

/// Identity-scoped persistence operations for movie lists.
///
/// Handlers hold this as a trait object injected at construction, so tests
/// can drive the full request pipeline against a fake store.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Insert one movie owned by `user_id`.
    async fn add_movie(&self, user_id: i32, movie_name: &str) -> Result<(), StoreError>;

    /// All movies owned by `user_id`, newest (highest id) first.
    async fn movies_for_user(&self, user_id: i32) -> Result<Vec<Movie>, StoreError>;

    /// Cheap connectivity probe for health reporting.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Postgres-backed movie store.
///
/// Every operation is a single auto-committed statement on a pooled
/// connection.
pub struct PgMovieStore {
    pool: PgPool,
}

impl PgMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn add_movie(&self, user_id: i32, movie_name: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO movies (user_id, movie_name) VALUES ($1, $2)")
            .bind(user_id)
            .bind(movie_name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn movies_for_user(&self, user_id: i32) -> Result<Vec<Movie>, StoreError> {
        let rows =
            sqlx::query("SELECT id, user_id, movie_name FROM movies WHERE user_id = $1 ORDER BY id DESC")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        // Decode row by row: one undecodable row is logged and dropped
        // instead of failing the whole read.
        let mut movies = Vec::with_capacity(rows.len());
        for row in rows {
            match Movie::from_row(&row) {
                Ok(movie) => movies.push(movie),
                Err(e) => tracing::warn!("skipping undecodable movie row for user {}: {}", user_id, e),
            }
        }

        Ok(movies)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
