//! Schema command - create tables and sequences

use anyhow::{Context, Result};
use bookshelf_db::schema::ensure_schema;
use bookshelf_db::{connect, release, DbConfig};

pub async fn run_schema(db: &DbConfig) -> Result<()> {
    let mut conn = connect(db).await.context("failed to connect to database")?;
    let result = ensure_schema(&mut conn).await;
    release(conn, result)
        .await
        .context("failed to create schema")?;

    println!("Schema ready: author, book, author_seq, book_seq");
    Ok(())
}
