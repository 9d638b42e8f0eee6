//! Author repository
//!
//! - ids are drawn from `author_seq` before insert
//! - inserts go through [`super::insert_batch`] so they share a transaction with books

use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::error::Result;
use crate::models::{Author, NewAuthor};

/// Author repository over a borrowed connection
pub struct AuthorRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> AuthorRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Next value of `author_seq`.
    pub async fn next_id(&mut self) -> Result<i64> {
        let id: i64 = sqlx::query_scalar("SELECT nextval('author_seq')")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(id)
    }

    /// All authors, oldest id first.
    pub async fn list(&mut self) -> Result<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT author_id, full_name FROM author ORDER BY author_id",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(authors)
    }

    /// Delete every author. Books must be gone first (FK).
    pub async fn delete_all(&mut self) -> Result<u64> {
        let done = sqlx::query("DELETE FROM author")
            .execute(&mut *self.conn)
            .await?;
        Ok(done.rows_affected())
    }
}

/// Multi-row `INSERT INTO author`; caller guarantees `authors` is non-empty.
pub(crate) fn insert_query(authors: &[NewAuthor]) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("INSERT INTO author (author_id, full_name) ");
    qb.push_values(authors, |mut row, author| {
        row.push_bind(author.author_id)
            .push_bind(author.full_name.clone());
    });
    qb
}
