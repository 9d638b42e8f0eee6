//! Row types, insert records and the value objects built from the join

pub mod author;
pub mod book;

pub use author::{Author, AuthorView, NewAuthor};
pub use book::{Book, BookView, DeleteCounts, NewBook};
