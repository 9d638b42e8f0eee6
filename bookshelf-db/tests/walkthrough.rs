//! End-to-end checks of the walkthrough against a real PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p bookshelf-db -- --ignored
//!
//! The tests share the `author`/`book` tables, so each one holds `DB_LOCK`
//! and starts from empty tables.

use bookshelf_db::demo::{self, TITLE_PATTERN};
use bookshelf_db::repo::{self, AuthorRepo, BookRepo};
use bookshelf_db::schema::ensure_schema;
use bookshelf_db::{connect, release, BookView, DbConfig, DbError, DeleteCounts, NewAuthor, NewBook};
use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use tokio::sync::Mutex;

static DB_LOCK: Mutex<()> = Mutex::const_new(());

async fn fresh_connection() -> PgConnection {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let mut conn = connect(&DbConfig::Url(url)).await.expect("connect failed");
    ensure_schema(&mut conn).await.expect("schema failed");
    demo::delete_all(&mut conn).await.expect("cleanup failed");
    conn
}

async fn db_now(conn: &mut PgConnection) -> DateTime<Utc> {
    sqlx::query_scalar("SELECT now()")
        .fetch_one(conn)
        .await
        .expect("now() failed")
}

#[tokio::test]
#[ignore = "requires database"]
async fn seed_links_books_to_their_authors() {
    let _guard = DB_LOCK.lock().await;
    let mut conn = fresh_connection().await;

    let seeded = demo::seed(&mut conn).await.unwrap();
    assert_eq!(repo::counts(&mut conn).await.unwrap(), (2, 2));

    let authors = AuthorRepo::new(&mut conn).list().await.unwrap();
    let books = BookRepo::new(&mut conn).list().await.unwrap();
    let author_of = |title: &str| {
        let book = books.iter().find(|b| b.title == title).expect("book missing");
        authors
            .iter()
            .find(|a| a.author_id == book.author_id)
            .map(|a| a.full_name.clone())
            .expect("dangling author_id")
    };

    assert_eq!(author_of("Domain Driven Design"), "Eric Evans");
    assert_eq!(author_of("Implementing Domain Driven Design"), "Vaughn Vernon");
    assert_eq!(seeded.authors.len(), 2);
    assert_ne!(seeded.authors[0].author_id, seeded.authors[1].author_id);

    demo::delete_all(&mut conn).await.unwrap();
    release(conn, Ok(())).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn join_pairs_titles_with_authors() {
    let _guard = DB_LOCK.lock().await;
    let mut conn = fresh_connection().await;
    demo::seed(&mut conn).await.unwrap();

    let views = BookRepo::new(&mut conn).with_authors().await.unwrap();
    assert_eq!(
        views,
        vec![
            BookView::new("Domain Driven Design", "Eric Evans"),
            BookView::new("Implementing Domain Driven Design", "Vaughn Vernon"),
        ]
    );

    demo::delete_all(&mut conn).await.unwrap();
    release(conn, Ok(())).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn date_added_is_set_at_insert() {
    let _guard = DB_LOCK.lock().await;
    let mut conn = fresh_connection().await;

    let before = db_now(&mut conn).await;
    demo::seed(&mut conn).await.unwrap();

    let date = BookRepo::new(&mut conn)
        .date_added_by_title(TITLE_PATTERN)
        .await
        .unwrap()
        .expect("no book matched");
    assert!(date >= before);

    let none = BookRepo::new(&mut conn)
        .date_added_by_title("No Such Title%")
        .await
        .unwrap();
    assert!(none.is_none());

    let err = BookRepo::new(&mut conn)
        .date_added_by_title("%Domain%")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::TooManyRows { count: 2, .. }));

    demo::delete_all(&mut conn).await.unwrap();
    release(conn, Ok(())).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn failed_batch_inserts_nothing() {
    let _guard = DB_LOCK.lock().await;
    let mut conn = fresh_connection().await;

    let authors = [NewAuthor::new(-1, "Eric Evans")];
    // -2 has no author row, so the FK rejects the whole batch
    let books = [NewBook::new(-1, -2, "Domain Driven Design")];
    let err = repo::insert_batch(&mut conn, &authors, &books).await.unwrap_err();

    assert!(matches!(err, DbError::Sqlx(_)));
    assert_eq!(repo::counts(&mut conn).await.unwrap(), (0, 0));

    release(conn, Ok(())).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn full_run_twice_leaves_tables_empty() {
    let _guard = DB_LOCK.lock().await;
    let mut conn = fresh_connection().await;

    for _ in 0..2 {
        let before = db_now(&mut conn).await;
        let mut out = Vec::new();
        let report = demo::run(&mut conn, &mut out).await.unwrap();

        assert_eq!(report.authors.len(), 2);
        assert_eq!(report.book_views.len(), 2);
        assert!(report.date_added.expect("date_added missing") >= before);
        assert_eq!(
            report.deleted,
            DeleteCounts {
                books: 2,
                authors: 2
            }
        );
        assert_eq!(repo::counts(&mut conn).await.unwrap(), (0, 0));

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("======From Fetch Into =======").count(), 2);
        assert_eq!(printed.matches("From Stream").count(), 2);
        assert!(printed.contains("AUTHOR.FULL_NAME: Vaughn Vernon"));
        assert!(printed.contains("Deleted 2 books and 2 authors"));
    }

    release(conn, Ok(())).await.unwrap();
}
