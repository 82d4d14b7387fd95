//! Vertex synchronization.
//!
//! One vertex per user id. Existing vertices are left untouched
//! (first-write-wins): attribute changes in the relational source are
//! not propagated on re-run.

use tracing::debug;

use followsync_db::UserRecord;

use crate::error::GraphResult;
use crate::store::{GraphStore, NewVertex};

/// Outcome of syncing one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexOutcome {
    Created,
    AlreadyPresent,
}

/// Ensure exactly one vertex exists for this user.
pub async fn sync_user<S: GraphStore>(store: &S, user: &UserRecord) -> GraphResult<VertexOutcome> {
    if store.vertex_exists(&user.user_id).await? {
        return Ok(VertexOutcome::AlreadyPresent);
    }

    let vertex = NewVertex {
        id: user.user_id.clone(),
        nickname: user.nickname.clone().unwrap_or_default(),
        birth: user
            .birth
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    };

    store.create_vertex(&vertex).await?;
    debug!(user_id = %user.user_id, "Created vertex");
    Ok(VertexOutcome::Created)
}
