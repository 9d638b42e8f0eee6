use sqlx::FromRow;

/// Author record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Author {
    pub author_id: i64,
    pub full_name: String,
}

/// Author to insert; the id comes from `author_seq`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub author_id: i64,
    pub full_name: String,
}

impl NewAuthor {
    pub fn new(author_id: i64, full_name: impl Into<String>) -> Self {
        Self {
            author_id,
            full_name: full_name.into(),
        }
    }
}

/// Author name as projected by the book/author join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorView {
    pub full_name: String,
}
