//! followsync — one-shot sync of relational users and follows into a
//! property graph.
//!
//! Forward-only: the relational store is the source of truth and the
//! graph is a derived view, rebuilt to convergence by repeated runs.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use followsync_db::PgConfig;
use followsync_graph::{run_full_sync, BoltStore, GraphClient, GraphConfig, GraphSchema};

/// One-shot sync of users and follow relations into a property graph.
#[derive(Parser)]
#[command(name = "followsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Relational store host
    #[arg(long, env = "PG_HOST", default_value = "localhost")]
    pg_host: String,

    /// Relational store port
    #[arg(long, env = "PG_PORT", default_value_t = 5432)]
    pg_port: u16,

    /// Relational store user
    #[arg(long, env = "PG_USER", default_value = "postgres")]
    pg_user: String,

    /// Relational store password
    #[arg(long, env = "PG_PASSWORD", hide_env_values = true, default_value = "")]
    pg_password: String,

    /// Relational database name
    #[arg(long, env = "PG_DBNAME", default_value = "postgres")]
    pg_dbname: String,

    /// Graph store bolt URI
    #[arg(long, env = "GRAPH_URI", default_value = "bolt://localhost:7687")]
    graph_uri: String,

    /// Graph store user
    #[arg(long, env = "GRAPH_USER", default_value = "neo4j")]
    graph_user: String,

    /// Graph store password
    #[arg(long, env = "GRAPH_PASSWORD", hide_env_values = true, default_value = "")]
    graph_password: String,

    /// Label on user vertices
    #[arg(long, env = "USER_LABEL", default_value = "User")]
    user_label: String,

    /// Label on follow edges
    #[arg(long, env = "FOLLOW_EDGE_LABEL", default_value = "FOLLOWS")]
    follow_edge_label: String,

    /// Name of the boolean mutual-follow edge property
    #[arg(long, env = "FOLLOW_EDGE_NAME", default_value = "isMutual")]
    mutual_property: String,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "followsync=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let pg_config = PgConfig {
        host: cli.pg_host,
        port: cli.pg_port,
        user: cli.pg_user,
        password: cli.pg_password,
        dbname: cli.pg_dbname,
    };
    let graph_config = GraphConfig {
        uri: cli.graph_uri,
        user: cli.graph_user,
        password: cli.graph_password,
    };
    let schema = GraphSchema {
        user_label: cli.user_label,
        follow_edge_label: cli.follow_edge_label,
        mutual_property: cli.mutual_property,
    };

    let pool = followsync_db::connect(&pg_config)
        .await
        .context("Failed to connect to the relational store")?;
    let client = GraphClient::connect(&graph_config)
        .await
        .context("Failed to connect to the graph store")?;

    followsync_graph::schema::initialize_schema(&client, &schema).await?;

    let users = followsync_db::queries::list_users(&pool)
        .await
        .context("Failed to list users")?;
    let follows = followsync_db::queries::list_follows(&pool)
        .await
        .context("Failed to list follow pairs")?;
    info!(users = users.len(), follows = follows.len(), "Loaded source records");

    let store = BoltStore::new(client.clone(), schema.clone());
    let report = run_full_sync(&store, &users, &follows).await?;

    println!("\n{}", "Sync complete:".green().bold());
    println!("  Vertices created:    {}", report.vertices_created);
    println!("  Vertices existing:   {}", report.vertices_existing);
    println!("  Edges created:       {}", report.edges_created);
    println!("  Edges marked mutual: {}", report.edges_marked_mutual);
    println!("  Pairs skipped:       {}", report.pairs_skipped);

    let counts = client.get_counts(&schema).await?;
    println!(
        "\n  Graph now holds {} vertices and {} edges.",
        counts.vertices.to_string().cyan(),
        counts.edges.to_string().cyan()
    );

    Ok(())
}
