//! Error types for bookshelf-db
//!
//! Library code returns these; the CLI wraps them with `anyhow` context.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// A query expected to yield at most one row produced several
    #[error("expected at most one row from {query}, got {count}")]
    TooManyRows { query: &'static str, count: usize },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
