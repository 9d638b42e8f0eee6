//! Status command - row counts for both tables

use anyhow::{Context, Result};
use bookshelf_db::{connect, release, repo, DbConfig};

pub async fn run_status(db: &DbConfig) -> Result<()> {
    let mut conn = connect(db).await.context("failed to connect to database")?;
    let result = repo::counts(&mut conn).await;
    let (authors, books) = release(conn, result)
        .await
        .context("failed to count rows")?;

    println!("authors: {authors}");
    println!("books:   {books}");
    Ok(())
}
