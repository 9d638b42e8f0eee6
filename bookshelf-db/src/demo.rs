//! The walkthrough itself: insert, select, join, filtered scalar, delete
//!
//! Steps run strictly in order on one connection. Each step prints its block
//! to the supplied writer before the next statement is issued.

use std::io::Write;

use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use crate::error::Result;
use crate::models::{Author, BookView, DeleteCounts, NewAuthor, NewBook};
use crate::repo::{self, AuthorRepo, BookRepo};
use crate::report;

/// Authors and their books inserted by [`seed`]
pub const SEED: &[(&str, &str)] = &[
    ("Eric Evans", "Domain Driven Design"),
    ("Vaughn Vernon", "Implementing Domain Driven Design"),
];

/// LIKE pattern for the date-added lookup
pub const TITLE_PATTERN: &str = "Domain%";

/// Records written by [`seed`], with their sequence-assigned ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seeded {
    pub authors: Vec<NewAuthor>,
    pub books: Vec<NewBook>,
}

/// Everything the walkthrough observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub seeded: Seeded,
    pub authors: Vec<Author>,
    pub book_views: Vec<BookView>,
    pub date_added: Option<DateTime<Utc>>,
    pub deleted: DeleteCounts,
}

/// Draw ids from the sequences and insert [`SEED`] in one batch.
///
/// All author ids are drawn before any book id, and books point at the
/// author drawn for the same seed row.
pub async fn seed(conn: &mut PgConnection) -> Result<Seeded> {
    let mut authors = Vec::with_capacity(SEED.len());
    {
        let mut author_repo = AuthorRepo::new(&mut *conn);
        for (name, _) in SEED {
            authors.push(NewAuthor::new(author_repo.next_id().await?, *name));
        }
    }

    let mut books = Vec::with_capacity(SEED.len());
    {
        let mut book_repo = BookRepo::new(&mut *conn);
        for (author, (_, title)) in authors.iter().zip(SEED) {
            let book_id = book_repo.next_id().await?;
            books.push(NewBook::new(book_id, author.author_id, *title));
        }
    }

    repo::insert_batch(conn, &authors, &books).await?;
    tracing::info!(
        authors = authors.len(),
        books = books.len(),
        "inserted seed batch"
    );

    Ok(Seeded { authors, books })
}

/// Delete books, then authors.
pub async fn delete_all(conn: &mut PgConnection) -> Result<DeleteCounts> {
    let books = BookRepo::new(&mut *conn).delete_all().await?;
    let authors = AuthorRepo::new(&mut *conn).delete_all().await?;
    tracing::info!(books, authors, "deleted rows");
    Ok(DeleteCounts { books, authors })
}

/// Run the whole walkthrough, printing each block to `out`.
pub async fn run<W: Write>(conn: &mut PgConnection, out: &mut W) -> Result<DemoReport> {
    tracing::info!(step = "insert", "starting walkthrough");
    let seeded = seed(conn).await?;

    tracing::info!(step = "select");
    let authors = AuthorRepo::new(&mut *conn).list().await?;
    out.write_all(report::authors(&authors).as_bytes())?;

    tracing::info!(step = "join");
    let book_views = BookRepo::new(&mut *conn).with_authors().await?;
    out.write_all(report::book_views(&book_views).as_bytes())?;

    tracing::info!(step = "date-added", pattern = TITLE_PATTERN);
    let date_added = BookRepo::new(&mut *conn)
        .date_added_by_title(TITLE_PATTERN)
        .await?;
    out.write_all(report::date_added(date_added).as_bytes())?;

    tracing::info!(step = "delete");
    let deleted = delete_all(conn).await?;
    out.write_all(report::deletes(deleted).as_bytes())?;
    out.flush()?;

    Ok(DemoReport {
        seeded,
        authors,
        book_views,
        date_added,
        deleted,
    })
}
