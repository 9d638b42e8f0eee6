//! Repository implementations for database access
//!
//! - one borrowed `PgConnection` per repo, no pool
//! - multi-step writes run in a transaction
//! - ordering is by id so output is stable across runs

pub mod authors;
pub mod books;

pub use authors::AuthorRepo;
pub use books::BookRepo;

use sqlx::{Connection, PgConnection};

use crate::error::Result;
use crate::models::{NewAuthor, NewBook};

/// Insert authors then books as one unit.
///
/// Each table gets a single multi-row INSERT; both run inside one
/// transaction, so a constraint violation leaves neither table touched.
pub async fn insert_batch(
    conn: &mut PgConnection,
    authors: &[NewAuthor],
    books: &[NewBook],
) -> Result<()> {
    let mut tx = conn.begin().await?;

    if !authors.is_empty() {
        let mut qb = authors::insert_query(authors);
        let done = qb.build().execute(&mut *tx).await?;
        tracing::debug!(rows = done.rows_affected(), "inserted authors");
    }

    if !books.is_empty() {
        let mut qb = books::insert_query(books);
        let done = qb.build().execute(&mut *tx).await?;
        tracing::debug!(rows = done.rows_affected(), "inserted books");
    }

    tx.commit().await?;
    Ok(())
}

/// Row counts for `author` and `book`, in that order.
pub async fn counts(conn: &mut PgConnection) -> Result<(i64, i64)> {
    let counts: (i64, i64) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM author), (SELECT COUNT(*) FROM book)",
    )
    .fetch_one(&mut *conn)
    .await?;
    Ok(counts)
}
