//! bookshelf CLI - author/book CRUD walkthrough against PostgreSQL
//!
//! - `bookshelf` / `bookshelf run`: insert, select, join, date lookup, delete
//! - `bookshelf schema`: create the tables and sequences the walkthrough uses
//! - `bookshelf status`: row counts for both tables

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bookshelf_db::config::os_user;
use bookshelf_db::{BookshelfConfig, DbConfig, DbOverrides};
use clap::{Args, Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::run::RunArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "bookshelf",
    author,
    version,
    about = "Insert, query, join and delete authors and books in PostgreSQL",
    long_about = "Connects to PostgreSQL as the current OS user (localhost:5432, database named \
                  after the user, empty password) unless told otherwise, then walks through \
                  a batched insert, a select, a join, a filtered lookup and a delete."
)]
struct Cli {
    #[command(flatten)]
    db: DbArgs,

    /// Config file (default: ~/.bookshelf/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the walkthrough (default)
    Run(RunArgs),
    /// Create author/book tables and their id sequences if missing
    Schema,
    /// Show author and book row counts
    Status,
}

#[derive(Args, Debug, Default)]
struct DbArgs {
    /// Full connection URL; overrides every other connection setting
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Database host [default: localhost]
    #[arg(long, global = true, env = "BOOKSHELF_DB_HOST")]
    host: Option<String>,

    /// Database port [default: 5432]
    #[arg(long, global = true, env = "BOOKSHELF_DB_PORT")]
    port: Option<u16>,

    /// Database name [default: the user name]
    #[arg(long, global = true, env = "BOOKSHELF_DB_NAME")]
    database: Option<String>,

    /// Database user [default: the current OS user]
    #[arg(long, global = true, env = "BOOKSHELF_DB_USER")]
    user: Option<String>,

    /// Database password [default: empty]
    #[arg(long, global = true, env = "BOOKSHELF_DB_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl DbArgs {
    fn overrides(&self) -> DbOverrides {
        DbOverrides {
            url: self.database_url.clone(),
            host: self.host.clone(),
            port: self.port,
            database: self.database.clone(),
            username: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<BookshelfConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            BookshelfConfig::load_from(path)
                .with_context(|| format!("failed to load config file {}", path.display()))
        }
        None => BookshelfConfig::load_or_default().context("failed to load config file"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env may carry DATABASE_URL; load it before clap reads the environment
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    let file = load_config(cli.config.as_ref())?;
    let db = DbConfig::resolve(&cli.db.overrides(), &file.database, os_user())
        .context("failed to resolve database settings")?;

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => commands::run_walkthrough(&db, args).await?,
        Commands::Schema => commands::run_schema(&db).await?,
        Commands::Status => commands::run_status(&db).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_runs_walkthrough() {
        let cli = Cli::try_parse_from(["bookshelf"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "bookshelf",
            "status",
            "--host",
            "db.internal",
            "--port",
            "6543",
            "--user",
            "reader",
        ])
        .unwrap();

        let overrides = cli.db.overrides();
        assert_eq!(overrides.host.as_deref(), Some("db.internal"));
        assert_eq!(overrides.port, Some(6543));
        assert_eq!(overrides.username.as_deref(), Some("reader"));
        assert!(matches!(cli.command, Some(Commands::Status)));
    }

    #[test]
    fn run_accepts_init_schema() {
        let cli = Cli::try_parse_from(["bookshelf", "run", "--init-schema"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => assert!(args.init_schema),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
