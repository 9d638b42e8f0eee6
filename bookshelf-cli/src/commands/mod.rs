//! Command implementations for the bookshelf CLI

pub mod run;
pub mod schema;
pub mod status;

pub use run::run_walkthrough;
pub use schema::run_schema;
pub use status::run_status;
