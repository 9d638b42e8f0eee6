//! Console blocks printed by the walkthrough
//!
//! Human-readable only; nothing parses this output.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{Author, BookView, DeleteCounts};

const FETCH_HEADER: &str = "======From Fetch Into =======";
const STREAM_HEADER: &str = "=============== From Stream ================";
const CONVERSION_HEADER: &str = "=============== Data Conversion ================";
const DELETE_HEADER: &str = "============ Deletes =============";

/// One block per author.
pub fn authors(authors: &[Author]) -> String {
    let mut out = String::new();
    for author in authors {
        out.push_str(&format!("{FETCH_HEADER}\n{}\n", author.full_name));
    }
    out
}

/// One block per joined book/author row.
pub fn book_views(views: &[BookView]) -> String {
    let mut out = String::new();
    for view in views {
        out.push_str(&format!(
            "{STREAM_HEADER}\nBOOK.TITLE: {}\nAUTHOR.FULL_NAME: {}\n",
            view.title, view.author.full_name
        ));
    }
    out
}

pub fn date_added(date: Option<DateTime<Utc>>) -> String {
    let rendered = date
        .map(|d| d.to_rfc3339_opts(SecondsFormat::Micros, true))
        .unwrap_or_else(|| "none".to_owned());
    format!("{CONVERSION_HEADER}\nDate Added: {rendered}\n")
}

pub fn deletes(counts: DeleteCounts) -> String {
    format!(
        "{DELETE_HEADER}\nDeleted {} books and {} authors\n",
        counts.books, counts.authors
    )
}
