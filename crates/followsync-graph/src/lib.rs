//! # followsync-graph
//!
//! Property-graph side of followsync.
//!
//! Provides the Bolt connection client, the `GraphStore` adapter over
//! the backend, vertex/edge synchronizers and the run driver.

pub mod client;
pub mod error;
pub mod schema;
pub mod store;
pub mod sync;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use error::{GraphError, GraphResult};
pub use store::{BoltStore, EdgeRef, GraphSchema, GraphStore, NewVertex, Vertex};
pub use sync::{run_full_sync, SyncReport};
