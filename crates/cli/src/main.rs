//! `storefront` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — sync the schema and start the API server (the default when
//!   no sub-command is given).
//! - `migrate` — sync the schema and exit.
//! - `seed`    — recreate the schema and load the demo catalog.

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{DatabaseConfig, ServerConfig};

#[derive(Parser)]
#[command(
    name = "storefront",
    about = "REST API over a catalog of products, categories and tags",
    version
)]
struct Cli {
    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServerConfig,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve(ServerConfig),
    /// Create any missing tables and exit.
    Migrate(DatabaseConfig),
    /// Recreate the schema and insert demo data.
    Seed(DatabaseConfig),
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "storefront={level},api={level},catalog={level},db={level},tower_http={level}"
        ))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn connect(database: &DatabaseConfig) -> anyhow::Result<db::DbPool> {
    db::pool::create_pool(&database.database_url, database.max_connections)
        .await
        .with_context(|| format!("failed to connect to {}", database.database_url))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; anything in it only fills unset variables.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command.unwrap_or(Command::Serve(cli.serve)) {
        Command::Serve(server) => {
            let pool = connect(&server.database).await?;
            if server.reset {
                db::pool::reset_schema(&pool).await.context("schema reset failed")?;
            } else {
                db::pool::run_migrations(&pool).await.context("schema sync failed")?;
            }
            let bind = server.bind_address();
            info!("Starting API server on {bind}");
            api::serve(&bind, pool)
                .await
                .with_context(|| format!("server on {bind} failed"))?;
        }
        Command::Migrate(database) => {
            info!("Running migrations against {}", database.database_url);
            let pool = connect(&database).await?;
            db::pool::run_migrations(&pool).await.context("migration failed")?;
            info!("Migrations applied successfully");
        }
        Command::Seed(database) => {
            let pool = connect(&database).await?;
            let summary = catalog::seed::seed_all(&pool).await.context("seeding failed")?;
            println!(
                "Seeded {} categories, {} tags, {} products and {} product tags",
                summary.categories, summary.tags, summary.products, summary.pairings
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_reads_explicit_flags() {
        let cli = Cli::try_parse_from([
            "storefront",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "4000",
            "--reset",
            "--database-url",
            "sqlite::memory:",
            "--max-connections",
            "2",
        ])
        .unwrap();

        let Some(Command::Serve(server)) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(server.bind_address(), "127.0.0.1:4000");
        assert!(server.reset);
        assert_eq!(server.database.database_url, "sqlite::memory:");
        assert_eq!(server.database.max_connections, 2);
    }

    #[test]
    fn seed_accepts_database_flags_and_global_log_level() {
        let cli = Cli::try_parse_from([
            "storefront",
            "seed",
            "--database-url",
            "sqlite://demo.db",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Some(Command::Seed(ref database)) if database.database_url == "sqlite://demo.db"));
    }

    #[test]
    fn bare_invocation_serves() {
        let cli = Cli::try_parse_from([
            "storefront",
            "--port",
            "4000",
            "--database-url",
            "sqlite::memory:",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.serve.bind_address(), "0.0.0.0:4000");
        assert!(!cli.serve.reset);
        assert_eq!(cli.serve.database.database_url, "sqlite::memory:");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
