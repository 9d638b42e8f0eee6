use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::AuthorView;

/// Book record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub book_id: i64,
    pub author_id: i64,
    pub title: String,
    pub date_added: DateTime<Utc>,
}

/// Book to insert. `date_added` is left to the column default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub book_id: i64,
    pub author_id: i64,
    pub title: String,
}

impl NewBook {
    pub fn new(book_id: i64, author_id: i64, title: impl Into<String>) -> Self {
        Self {
            book_id,
            author_id,
            title: title.into(),
        }
    }
}

/// Title plus author name, one per row of the join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookView {
    pub title: String,
    pub author: AuthorView,
}

impl BookView {
    pub fn new(title: impl Into<String>, author_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: AuthorView {
                full_name: author_name.into(),
            },
        }
    }
}

/// Rows removed by the delete step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteCounts {
    pub books: u64,
    pub authors: u64,
}
