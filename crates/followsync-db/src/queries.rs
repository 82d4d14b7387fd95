//! Read-only queries against the relational store.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use crate::model::{FollowPair, UserRecord};
use crate::DbResult;

/// List all active (non-deleted) users.
pub async fn list_users(pool: &PgPool) -> DbResult<Vec<UserRecord>> {
    let rows = sqlx::query_as::<_, (String, Option<String>, Option<NaiveDate>)>(
        "SELECT user_id, nickname, birth
         FROM users
         WHERE deleted_at IS NULL",
    )
    .fetch_all(pool)
    .await?;

    debug!(count = rows.len(), "Loaded users");

    Ok(rows
        .into_iter()
        .map(|(user_id, nickname, birth)| UserRecord {
            user_id,
            nickname,
            birth,
        })
        .collect())
}

/// List all active (non-deleted) follow pairs, oldest first.
///
/// The ascending `created_at` order is load-bearing: edge direction is
/// attributed to the first follow seen between a pair of users.
pub async fn list_follows(pool: &PgPool) -> DbResult<Vec<FollowPair>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        "SELECT user_id, target_id
         FROM follow
         WHERE deleted_at IS NULL
         ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    debug!(count = rows.len(), "Loaded follow pairs");

    Ok(rows
        .into_iter()
        .map(|(from_user_id, to_user_id)| FollowPair {
            from_user_id,
            to_user_id,
        })
        .collect())
}
