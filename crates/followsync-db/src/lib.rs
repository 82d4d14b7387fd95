//! Relational source layer for followsync.
//!
//! Reads active users and follow pairs from PostgreSQL. The relational
//! store is the source of truth; this crate only ever reads from it.

pub mod config;
pub mod model;
pub mod queries;

pub use config::PgConfig;
pub use model::{FollowPair, UserRecord};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

/// Errors from the relational store.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("relational store error: {0}")]
    Sql(#[from] sqlx::Error),
}

/// Result type for relational store operations.
pub type DbResult<T> = Result<T, DbError>;

/// Open a connection pool to the relational store.
///
/// The pool is capped at a single connection: the sync is a strict
/// sequential pass and never issues overlapping queries.
pub async fn connect(config: &PgConfig) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(config.connect_options())
        .await?;
    Ok(pool)
}
