//! Graph store adapter.
//!
//! `GraphStore` is the capability set the synchronizers run against:
//! vertex lookup and creation, direction-agnostic follow-edge lookup,
//! edge creation, and the mutual-flag property set. The Bolt
//! implementation normalizes the backend's zero-result outcome into
//! `GraphError::NotFound`; nothing outside this module inspects raw
//! backend errors.

use async_trait::async_trait;
use neo4rs::Query;

use crate::client::GraphClient;
use crate::error::{GraphError, GraphResult};

/// Environment-supplied graph identifiers, threaded through every
/// query. Never hardcoded in query text.
#[derive(Debug, Clone)]
pub struct GraphSchema {
    /// Label on user vertices.
    pub user_label: String,
    /// Label on follow edges.
    pub follow_edge_label: String,
    /// Name of the boolean mutual-follow edge property.
    pub mutual_property: String,
}

impl Default for GraphSchema {
    fn default() -> Self {
        Self {
            user_label: "User".to_string(),
            follow_edge_label: "FOLLOWS".to_string(),
            mutual_property: "isMutual".to_string(),
        }
    }
}

/// A vertex as read back from the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub id: String,
    pub nickname: String,
    pub birth: String,
}

/// Attributes for a vertex about to be created.
///
/// Absent source values are stored as empty strings, so the properties
/// are always present on the vertex.
#[derive(Debug, Clone)]
pub struct NewVertex {
    pub id: String,
    pub nickname: String,
    pub birth: String,
}

/// Opaque backend identity of an existing edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRef(pub String);

/// Capability set of the property-graph backend.
///
/// Implementable against any engine exposing label/id-based vertex
/// lookup, "edges incident to a vertex" traversal, and property
/// mutation on existing edges.
#[async_trait]
pub trait GraphStore {
    /// Whether a vertex with this id exists. Zero results is `false`,
    /// not an error.
    async fn vertex_exists(&self, id: &str) -> GraphResult<bool>;

    /// Fetch a vertex by id. Zero results is `NotFound`.
    async fn get_vertex(&self, id: &str) -> GraphResult<Vertex>;

    /// Create a vertex. Callers must have confirmed non-existence
    /// first; no native upsert is assumed of the backend.
    async fn create_vertex(&self, vertex: &NewVertex) -> GraphResult<()>;

    /// Find a follow edge between `a` and `b` regardless of direction.
    ///
    /// The backend capability assumed here is "edges incident to a
    /// vertex, either direction"; the opposite endpoint is resolved in
    /// the adapter, not by the store.
    async fn find_follow_edge(&self, a: &str, b: &str) -> GraphResult<EdgeRef>;

    /// Create a follow edge `from -> to`.
    async fn create_follow_edge(&self, from: &str, to: &str, mutual: bool) -> GraphResult<()>;

    /// Set the mutual flag on an existing edge. Idempotent.
    async fn set_edge_mutual(&self, edge: &EdgeRef, value: bool) -> GraphResult<()>;
}

/// Quote an identifier for interpolation into Cypher text.
///
/// Labels and relationship types cannot be query parameters, so the
/// configured identifiers are spliced in with backtick quoting;
/// backticks inside the identifier are doubled.
pub(crate) fn backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// `GraphStore` over a Bolt connection.
pub struct BoltStore {
    client: GraphClient,
    schema: GraphSchema,
}

impl BoltStore {
    pub fn new(client: GraphClient, schema: GraphSchema) -> Self {
        Self { client, schema }
    }

    pub fn schema(&self) -> &GraphSchema {
        &self.schema
    }
}

#[async_trait]
impl GraphStore for BoltStore {
    async fn vertex_exists(&self, id: &str) -> GraphResult<bool> {
        let query = Query::new(format!(
            "MATCH (v:{} {{id: $id}}) RETURN v.id as id LIMIT 1",
            backtick(&self.schema.user_label)
        ))
        .param("id", id);

        let rows = self.client.query(query).await?;
        Ok(!rows.is_empty())
    }

    async fn get_vertex(&self, id: &str) -> GraphResult<Vertex> {
        // coalesce keeps the attribute columns non-null even for
        // vertices written without them, so any read failure below is
        // a genuine backend problem and propagates.
        let query = Query::new(format!(
            "MATCH (v:{} {{id: $id}})
             RETURN v.id as id,
                    coalesce(v.nickname, '') as nickname,
                    coalesce(v.birth, '') as birth",
            backtick(&self.schema.user_label)
        ))
        .param("id", id);

        let rows = self.client.query(query).await?;
        let row = rows.into_iter().next().ok_or(GraphError::NotFound)?;

        Ok(Vertex {
            id: row.get("id").map_err(GraphError::backend)?,
            nickname: row.get("nickname").map_err(GraphError::backend)?,
            birth: row.get("birth").map_err(GraphError::backend)?,
        })
    }

    async fn create_vertex(&self, vertex: &NewVertex) -> GraphResult<()> {
        let query = Query::new(format!(
            "CREATE (v:{} {{id: $id, nickname: $nickname, birth: $birth}})",
            backtick(&self.schema.user_label)
        ))
        .param("id", vertex.id.as_str())
        .param("nickname", vertex.nickname.as_str())
        .param("birth", vertex.birth.as_str());

        self.client.execute(query).await?;
        Ok(())
    }

    async fn find_follow_edge(&self, a: &str, b: &str) -> GraphResult<EdgeRef> {
        // Fetch every follow edge incident to `a`, either direction,
        // and resolve the opposite endpoint here.
        let query = Query::new(format!(
            "MATCH (a:{label} {{id: $id}})-[r:{edge}]-(other:{label})
             RETURN elementId(r) as edge_id, other.id as other_id",
            label = backtick(&self.schema.user_label),
            edge = backtick(&self.schema.follow_edge_label),
        ))
        .param("id", a);

        let rows = self.client.query(query).await?;
        for row in rows {
            let other_id: String = row.get("other_id").map_err(GraphError::backend)?;
            if other_id == b {
                let edge_id: String = row.get("edge_id").map_err(GraphError::backend)?;
                return Ok(EdgeRef(edge_id));
            }
        }

        Err(GraphError::NotFound)
    }

    async fn create_follow_edge(&self, from: &str, to: &str, mutual: bool) -> GraphResult<()> {
        let query = Query::new(format!(
            "MATCH (a:{label} {{id: $from}}), (b:{label} {{id: $to}})
             CREATE (a)-[r:{edge} {{{prop}: $mutual}}]->(b)",
            label = backtick(&self.schema.user_label),
            edge = backtick(&self.schema.follow_edge_label),
            prop = backtick(&self.schema.mutual_property),
        ))
        .param("from", from)
        .param("to", to)
        .param("mutual", mutual);

        self.client.execute(query).await?;
        Ok(())
    }

    async fn set_edge_mutual(&self, edge: &EdgeRef, value: bool) -> GraphResult<()> {
        let query = Query::new(format!(
            "MATCH ()-[r:{edge}]->() WHERE elementId(r) = $edge_id
             SET r.{prop} = $value",
            edge = backtick(&self.schema.follow_edge_label),
            prop = backtick(&self.schema.mutual_property),
        ))
        .param("edge_id", edge.0.as_str())
        .param("value", value);

        self.client.execute(query).await?;
        Ok(())
    }
}
