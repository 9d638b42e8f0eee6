//! Run command - the insert/select/join/delete walkthrough

use std::io;

use anyhow::{Context, Result};
use bookshelf_db::schema::ensure_schema;
use bookshelf_db::{connect, demo, release, DbConfig, DemoReport};
use clap::Parser;
use sqlx::PgConnection;

#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Create the author/book tables and sequences first if they are missing
    #[arg(long)]
    pub init_schema: bool,
}

pub async fn run_walkthrough(db: &DbConfig, args: RunArgs) -> Result<()> {
    let mut conn = connect(db).await.context("failed to connect to database")?;
    let result = walkthrough(&mut conn, &args).await;
    let report = release(conn, result).await.context("walkthrough failed")?;

    tracing::info!(
        authors = report.authors.len(),
        books = report.book_views.len(),
        "walkthrough complete"
    );
    Ok(())
}

async fn walkthrough(conn: &mut PgConnection, args: &RunArgs) -> bookshelf_db::Result<DemoReport> {
    if args.init_schema {
        ensure_schema(conn).await?;
    }
    let mut stdout = io::stdout();
    demo::run(conn, &mut stdout).await
}
