//! Schema bootstrap
//!
//! The walkthrough expects `author`, `book` and their id sequences to exist.
//! `ensure_schema` creates whatever is missing and leaves existing objects alone.

use sqlx::{Connection, PgConnection};

use crate::error::Result;

const STATEMENTS: &[&str] = &[
    "CREATE SEQUENCE IF NOT EXISTS author_seq",
    "CREATE SEQUENCE IF NOT EXISTS book_seq",
    r#"
    CREATE TABLE IF NOT EXISTS author (
        author_id BIGINT PRIMARY KEY,
        full_name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS book (
        book_id BIGINT PRIMARY KEY,
        author_id BIGINT NOT NULL REFERENCES author(author_id),
        title TEXT NOT NULL,
        date_added TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

/// Create sequences and tables if they do not exist yet (single transaction).
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<()> {
    tracing::info!("ensuring bookshelf schema");

    let mut tx = conn.begin().await?;
    for statement in STATEMENTS {
        sqlx::query(*statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    Ok(())
}
