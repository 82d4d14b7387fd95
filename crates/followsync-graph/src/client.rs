//! Bolt connection client.

use anyhow::{Context, Result};
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::store::{backtick, GraphSchema};

/// Configuration for connecting to the graph store.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
        }
    }
}

/// Client for graph store operations.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// Note: neo4rs uses a lazy deadpool — `Graph::connect` only creates the pool
    /// object and does NOT establish a real bolt connection yet.  We run a cheap
    /// `RETURN 1` ping immediately so that an unreachable backend fails here
    /// instead of hanging inside the first sync query.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db("neo4j")
            .max_connections(1) // One sequential connection for the whole run
            .fetch_size(100)
            .build()
            .context("Failed to build graph config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create graph connection pool")?;

        // Ping to force an actual TCP+bolt handshake so the caller's timeout works.
        graph.run(Query::new("RETURN 1".to_string())).await
            .context("Graph store is not responding to queries")?;

        Ok(Self { graph })
    }

    /// Execute a query that returns no results.
    pub async fn execute(&self, query: Query) -> Result<()> {
        self.graph.run(query).await.context("Graph query execution failed")?;
        Ok(())
    }

    /// Execute a query and return results as rows.
    ///
    /// A mid-stream failure propagates as an error. It must never be
    /// collapsed into an empty result: callers classify "zero rows" as
    /// `NotFound`, and a dropped connection is not `NotFound`.
    pub async fn query(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(query).await
            .context("Graph query failed")?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await.context("Graph result stream failed")? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(&self, query: Query, field: &str) -> Result<Option<T>> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row.get(field)
                .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", field, e))?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }

    /// Vertex and edge counts for the configured labels, for status display.
    pub async fn get_counts(&self, schema: &GraphSchema) -> Result<GraphCounts> {
        let vertex_query = Query::new(format!(
            "MATCH (v:{}) RETURN count(v) as count",
            backtick(&schema.user_label)
        ));
        let edge_query = Query::new(format!(
            "MATCH ()-[r:{}]->() RETURN count(r) as count",
            backtick(&schema.follow_edge_label)
        ));

        let vertex_count: i64 = self.query_scalar(vertex_query, "count").await?
            .unwrap_or(0);
        let edge_count: i64 = self.query_scalar(edge_query, "count").await?
            .unwrap_or(0);

        Ok(GraphCounts {
            vertices: vertex_count as usize,
            edges: edge_count as usize,
        })
    }
}

/// Vertex and edge counts.
#[derive(Debug, Clone)]
pub struct GraphCounts {
    pub vertices: usize,
    pub edges: usize,
}
