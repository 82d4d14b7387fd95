//! Follow-edge synchronization.
//!
//! The graph keeps at most one follow edge per **unordered** user
//! pair. Pairs arrive oldest-first: the first follow between two users
//! creates the edge in that direction with the mutual flag false; any
//! later follow between the same pair finds the existing edge and
//! flips the flag to true. Direction attribution therefore depends on
//! input order; mutuality does not.

use tracing::{debug, warn};

use crate::error::{GraphError, GraphResult};
use crate::store::GraphStore;

/// Outcome of syncing one follow pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// A new edge `from -> to` was created, mutual flag false.
    Created,
    /// An edge between the pair already existed; mutual flag set true.
    MarkedMutual,
    /// An endpoint vertex is missing; the pair was dropped.
    Skipped,
}

/// Ensure the follow relation is represented in the graph.
///
/// A pair referencing a vertex that was never synced is skipped with a
/// warning; this is a diagnostic, not a failure.
pub async fn sync_follow<S: GraphStore>(
    store: &S,
    from_id: &str,
    to_id: &str,
) -> GraphResult<EdgeOutcome> {
    debug!(from = %from_id, to = %to_id, "Syncing follow pair");

    if let Err(err) = store.get_vertex(from_id).await {
        return skip_or_fail(err, from_id);
    }
    if let Err(err) = store.get_vertex(to_id).await {
        return skip_or_fail(err, to_id);
    }

    match store.find_follow_edge(from_id, to_id).await {
        Ok(edge) => {
            store.set_edge_mutual(&edge, true).await?;
            Ok(EdgeOutcome::MarkedMutual)
        }
        Err(GraphError::NotFound) => {
            store.create_follow_edge(from_id, to_id, false).await?;
            Ok(EdgeOutcome::Created)
        }
        Err(err) => Err(err),
    }
}

fn skip_or_fail(err: GraphError, missing_id: &str) -> GraphResult<EdgeOutcome> {
    match err {
        GraphError::NotFound => {
            warn!(user_id = %missing_id, "Skipping follow pair; endpoint vertex missing");
            Ok(EdgeOutcome::Skipped)
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::super::support::MemoryGraph;
    use super::*;

    async fn seed_vertices(store: &MemoryGraph, ids: &[&str]) {
        use crate::store::NewVertex;
        for id in ids {
            store
                .create_vertex(&NewVertex {
                    id: id.to_string(),
                    nickname: String::new(),
                    birth: String::new(),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn single_follow_creates_non_mutual_edge() {
        let store = MemoryGraph::new();
        seed_vertices(&store, &["a", "b"]).await;

        let outcome = sync_follow(&store, "a", "b").await.unwrap();

        assert_eq!(outcome, EdgeOutcome::Created);
        let edges = store.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from, "a");
        assert_eq!(edges[0].to, "b");
        assert!(!edges[0].mutual);
    }

    #[tokio::test]
    async fn reverse_follow_marks_edge_mutual() {
        let store = MemoryGraph::new();
        seed_vertices(&store, &["a", "b"]).await;

        sync_follow(&store, "a", "b").await.unwrap();
        let outcome = sync_follow(&store, "b", "a").await.unwrap();

        assert_eq!(outcome, EdgeOutcome::MarkedMutual);
        let edges = store.edges();
        assert_eq!(edges.len(), 1);
        // Direction stays with the first-seen follow.
        assert_eq!(edges[0].from, "a");
        assert_eq!(edges[0].to, "b");
        assert!(edges[0].mutual);
    }

    #[tokio::test]
    async fn swapped_input_order_swaps_recorded_direction() {
        let store = MemoryGraph::new();
        seed_vertices(&store, &["a", "b"]).await;

        sync_follow(&store, "b", "a").await.unwrap();
        sync_follow(&store, "a", "b").await.unwrap();

        let edges = store.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from, "b");
        assert_eq!(edges[0].to, "a");
        assert!(edges[0].mutual);
    }

    #[tokio::test]
    async fn missing_from_vertex_skips_pair() {
        let store = MemoryGraph::new();
        seed_vertices(&store, &["b"]).await;

        let outcome = sync_follow(&store, "ghost", "b").await.unwrap();

        assert_eq!(outcome, EdgeOutcome::Skipped);
        assert!(store.edges().is_empty());
    }

    #[tokio::test]
    async fn missing_to_vertex_skips_pair() {
        let store = MemoryGraph::new();
        seed_vertices(&store, &["a"]).await;

        let outcome = sync_follow(&store, "a", "ghost").await.unwrap();

        assert_eq!(outcome, EdgeOutcome::Skipped);
        assert!(store.edges().is_empty());
    }

    #[tokio::test]
    async fn duplicate_same_direction_follow_marks_mutual() {
        // Faithful to the source algorithm: any second follow event
        // between the same pair sets the flag, whatever its direction.
        let store = MemoryGraph::new();
        seed_vertices(&store, &["a", "b"]).await;

        sync_follow(&store, "a", "b").await.unwrap();
        let outcome = sync_follow(&store, "a", "b").await.unwrap();

        assert_eq!(outcome, EdgeOutcome::MarkedMutual);
        assert_eq!(store.edges().len(), 1);
        assert!(store.edges()[0].mutual);
    }

    #[tokio::test]
    async fn backend_error_during_endpoint_lookup_is_fatal() {
        // A failed lookup is not a missing vertex: only `NotFound`
        // downgrades to a skip, anything else halts the run.
        let store = MemoryGraph::new();
        seed_vertices(&store, &["a", "b"]).await;
        store.fail_get_vertex_for("b");

        let err = sync_follow(&store, "a", "b").await.unwrap_err();

        assert!(!err.is_not_found());
        assert!(store.edges().is_empty());
    }

    #[tokio::test]
    async fn self_follow_is_permitted() {
        let store = MemoryGraph::new();
        seed_vertices(&store, &["a"]).await;

        let outcome = sync_follow(&store, "a", "a").await.unwrap();

        assert_eq!(outcome, EdgeOutcome::Created);
        let edges = store.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from, "a");
        assert_eq!(edges[0].to, "a");
    }
}
