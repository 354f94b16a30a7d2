//! Command-line and environment configuration.
//!
//! Every flag falls back to an environment variable, and a `.env` file in
//! the working directory is loaded into the environment before parsing.

use clap::Args;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://storefront.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 3001;

/// Where the catalog lives.
#[derive(Debug, Clone, Args)]
pub struct DatabaseConfig {
    /// SQLite connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Connection pool ceiling.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

/// Settings for the `serve` command.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Drop and recreate every table before serving.
    #[arg(long)]
    pub reset: bool,

    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
