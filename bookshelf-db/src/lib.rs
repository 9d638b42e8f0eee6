//! bookshelf-db: author/book CRUD walkthrough against PostgreSQL
//!
//! Opens a single connection, seeds two authors and their books in one
//! batched transaction, reads them back (plain select, join, filtered
//! scalar) and deletes everything again.

pub mod config;
pub mod connection;
pub mod demo;
pub mod error;
pub mod models;
pub mod repo;
pub mod report;
pub mod schema;

pub use config::{BookshelfConfig, ConnectParams, DatabaseSection, DbConfig, DbOverrides};
pub use connection::{connect, release};
pub use demo::{DemoReport, Seeded};
pub use error::{DbError, Result};
pub use models::{Author, AuthorView, Book, BookView, DeleteCounts, NewAuthor, NewBook};
