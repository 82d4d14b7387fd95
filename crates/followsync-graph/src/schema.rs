//! Graph schema initialization.
//!
//! Backs the "at most one vertex per user id" invariant with a
//! uniqueness constraint in the store itself.

use anyhow::Result;
use neo4rs::Query;
use tracing::info;

use crate::client::GraphClient;
use crate::store::{backtick, GraphSchema};

/// Initialize the graph schema for the configured labels.
///
/// Safe to run before every sync - uses IF NOT EXISTS.
pub async fn initialize_schema(client: &GraphClient, schema: &GraphSchema) -> Result<()> {
    let constraint = Query::new(format!(
        "CREATE CONSTRAINT user_vertex_id IF NOT EXISTS FOR (v:{}) REQUIRE v.id IS UNIQUE",
        backtick(&schema.user_label)
    ));
    client.execute(constraint).await?;

    info!(label = %schema.user_label, "Graph schema initialized");
    Ok(())
}
