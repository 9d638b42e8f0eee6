//! Book repository
//!
//! Reads include the book/author join projected into [`BookView`] and the
//! filtered `date_added` lookup.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, Postgres, QueryBuilder, Row};

use crate::error::{DbError, Result};
use crate::models::{Book, BookView, NewBook};

/// Book repository over a borrowed connection
pub struct BookRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> BookRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Next value of `book_seq`.
    pub async fn next_id(&mut self) -> Result<i64> {
        let id: i64 = sqlx::query_scalar("SELECT nextval('book_seq')")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(id)
    }

    pub async fn list(&mut self) -> Result<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT book_id, author_id, title, date_added FROM book ORDER BY book_id",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(books)
    }

    /// Book titles with their author's name.
    ///
    /// Single JOIN ... USING query; each row becomes a `BookView` holding an
    /// `AuthorView`.
    pub async fn with_authors(&mut self) -> Result<Vec<BookView>> {
        let rows = sqlx::query(
            r#"
            SELECT book.title, author.full_name
            FROM book
            JOIN author USING (author_id)
            ORDER BY book.book_id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        let views = rows
            .into_iter()
            .map(|r| {
                BookView::new(
                    r.get::<String, _>("title"),
                    r.get::<String, _>("full_name"),
                )
            })
            .collect();

        Ok(views)
    }

    /// `date_added` of the one book whose title matches the LIKE `pattern`.
    ///
    /// No match yields `None`; several matches are an error.
    pub async fn date_added_by_title(&mut self, pattern: &str) -> Result<Option<DateTime<Utc>>> {
        let dates: Vec<DateTime<Utc>> =
            sqlx::query_scalar("SELECT date_added FROM book WHERE title LIKE $1")
                .bind(pattern)
                .fetch_all(&mut *self.conn)
                .await?;

        match dates.as_slice() {
            [] => Ok(None),
            [date] => Ok(Some(*date)),
            _ => Err(DbError::TooManyRows {
                query: "date_added_by_title",
                count: dates.len(),
            }),
        }
    }

    pub async fn delete_all(&mut self) -> Result<u64> {
        let done = sqlx::query("DELETE FROM book")
            .execute(&mut *self.conn)
            .await?;
        Ok(done.rows_affected())
    }
}

/// Multi-row `INSERT INTO book`; caller guarantees `books` is non-empty.
pub(crate) fn insert_query(books: &[NewBook]) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("INSERT INTO book (book_id, author_id, title) ");
    qb.push_values(books, |mut row, book| {
        row.push_bind(book.book_id)
            .push_bind(book.author_id)
            .push_bind(book.title.clone());
    });
    qb
}
