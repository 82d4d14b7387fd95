//! In-memory `GraphStore` double for synchronizer tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{GraphError, GraphResult};
use crate::store::{EdgeRef, GraphStore, NewVertex, Vertex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub mutual: bool,
}

#[derive(Default)]
struct State {
    vertices: BTreeMap<String, (String, String)>,
    edges: Vec<StoredEdge>,
    next_edge_id: usize,
    fail_edge_create_for: Option<(String, String)>,
    fail_get_vertex_for: Option<String>,
}

/// Records vertices and edges in memory. Can inject a backend failure
/// on edge creation for one chosen pair.
#[derive(Default)]
pub struct MemoryGraph {
    state: Mutex<State>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_follow_edge` fail for this exact pair.
    pub fn fail_edge_create_for(&self, from: &str, to: &str) {
        self.state.lock().unwrap().fail_edge_create_for = Some((from.to_string(), to.to_string()));
    }

    /// Make `get_vertex` fail with a backend error for this id.
    pub fn fail_get_vertex_for(&self, id: &str) {
        self.state.lock().unwrap().fail_get_vertex_for = Some(id.to_string());
    }

    /// Stored (nickname, birth) for a vertex, if present.
    pub fn vertex(&self, id: &str) -> Option<(String, String)> {
        self.state.lock().unwrap().vertices.get(id).cloned()
    }

    pub fn vertex_count(&self) -> usize {
        self.state.lock().unwrap().vertices.len()
    }

    pub fn edges(&self) -> Vec<StoredEdge> {
        self.state.lock().unwrap().edges.clone()
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn vertex_exists(&self, id: &str) -> GraphResult<bool> {
        Ok(self.state.lock().unwrap().vertices.contains_key(id))
    }

    async fn get_vertex(&self, id: &str) -> GraphResult<Vertex> {
        let state = self.state.lock().unwrap();
        if state.fail_get_vertex_for.as_deref() == Some(id) {
            return Err(GraphError::backend(anyhow::anyhow!(
                "injected vertex lookup failure"
            )));
        }
        let (nickname, birth) = state.vertices.get(id).ok_or(GraphError::NotFound)?;
        Ok(Vertex {
            id: id.to_string(),
            nickname: nickname.clone(),
            birth: birth.clone(),
        })
    }

    async fn create_vertex(&self, vertex: &NewVertex) -> GraphResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.vertices.contains_key(&vertex.id) {
            return Err(GraphError::backend(anyhow::anyhow!(
                "duplicate vertex {}",
                vertex.id
            )));
        }
        state.vertices.insert(
            vertex.id.clone(),
            (vertex.nickname.clone(), vertex.birth.clone()),
        );
        Ok(())
    }

    async fn find_follow_edge(&self, a: &str, b: &str) -> GraphResult<EdgeRef> {
        let state = self.state.lock().unwrap();
        state
            .edges
            .iter()
            .find(|e| (e.from == a && e.to == b) || (e.from == b && e.to == a))
            .map(|e| EdgeRef(e.id.clone()))
            .ok_or(GraphError::NotFound)
    }

    async fn create_follow_edge(&self, from: &str, to: &str, mutual: bool) -> GraphResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some((f, t)) = &state.fail_edge_create_for {
            if f == from && t == to {
                return Err(GraphError::backend(anyhow::anyhow!(
                    "injected edge creation failure"
                )));
            }
        }
        let id = format!("e{}", state.next_edge_id);
        state.next_edge_id += 1;
        state.edges.push(StoredEdge {
            id,
            from: from.to_string(),
            to: to.to_string(),
            mutual,
        });
        Ok(())
    }

    async fn set_edge_mutual(&self, edge: &EdgeRef, value: bool) -> GraphResult<()> {
        let mut state = self.state.lock().unwrap();
        let found = state
            .edges
            .iter_mut()
            .find(|e| e.id == edge.0)
            .ok_or(GraphError::NotFound)?;
        found.mutual = value;
        Ok(())
    }
}
