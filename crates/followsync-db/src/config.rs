//! PostgreSQL connection configuration.

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

/// Connection parameters for the relational store.
///
/// All fields are environment-supplied; see the CLI for the variable
/// names.
#[derive(Debug, Clone, Deserialize)]
pub struct PgConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl Default for PgConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            dbname: "postgres".to_string(),
        }
    }
}

impl PgConfig {
    /// Build sqlx connect options from this config.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
    }
}
