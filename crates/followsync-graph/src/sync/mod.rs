//! Relational-to-graph synchronization pipeline.
//!
//! Two strictly sequential phases: every user becomes a vertex, then
//! every follow pair becomes (or marks) an edge. Edges assume their
//! endpoint vertices exist, so the vertex pass must drain completely
//! before the edge pass starts.

pub mod edge_sync;
pub mod vertex_sync;

#[cfg(test)]
pub(crate) mod support;

use tracing::info;

use followsync_db::{FollowPair, UserRecord};

use crate::error::GraphResult;
use crate::store::GraphStore;
use edge_sync::EdgeOutcome;
use vertex_sync::VertexOutcome;

/// Counters for one full sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub vertices_created: usize,
    pub vertices_existing: usize,
    pub edges_created: usize,
    pub edges_marked_mutual: usize,
    pub pairs_skipped: usize,
}

/// Run a full one-shot sync: all vertices, then all edges.
///
/// Any backend error halts the run immediately. Vertices and edges
/// already written stay in place; the two stores are not
/// transactionally linked, so a mid-run failure leaves the graph
/// partially synchronized but individually consistent. Skipped pairs
/// are diagnostics, not failures.
pub async fn run_full_sync<S: GraphStore>(
    store: &S,
    users: &[UserRecord],
    follows: &[FollowPair],
) -> GraphResult<SyncReport> {
    info!(users = users.len(), follows = follows.len(), "Starting full graph sync");

    let mut report = SyncReport::default();

    for user in users {
        match vertex_sync::sync_user(store, user).await? {
            VertexOutcome::Created => report.vertices_created += 1,
            VertexOutcome::AlreadyPresent => report.vertices_existing += 1,
        }
    }

    info!(
        created = report.vertices_created,
        existing = report.vertices_existing,
        "Vertices synced"
    );

    for pair in follows {
        match edge_sync::sync_follow(store, &pair.from_user_id, &pair.to_user_id).await? {
            EdgeOutcome::Created => report.edges_created += 1,
            EdgeOutcome::MarkedMutual => report.edges_marked_mutual += 1,
            EdgeOutcome::Skipped => report.pairs_skipped += 1,
        }
    }

    info!(
        created = report.edges_created,
        mutual = report.edges_marked_mutual,
        skipped = report.pairs_skipped,
        "Edges synced"
    );

    Ok(report)
}
