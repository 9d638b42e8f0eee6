//! Single-connection lifecycle
//!
//! The walkthrough uses exactly one `PgConnection` for every statement;
//! there is no pool. [`release`] closes it on both the success and the
//! failure path.

use sqlx::{Connection, PgConnection};

use crate::config::{display_url, DbConfig};
use crate::error::Result;

/// Open the connection described by `config`.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the server refuses
/// the connection.
///
/// # Example
///
/// ```ignore
/// let mut conn = connect(&DbConfig::from_os_user()?).await?;
/// let result = demo::run(&mut conn, &mut std::io::stdout()).await;
/// let report = release(conn, result).await?;
/// ```
pub async fn connect(config: &DbConfig) -> Result<PgConnection> {
    let options = config.connect_options()?;
    tracing::info!(url = %display_url(&options), "connecting");

    let conn = PgConnection::connect_with(&options).await?;
    tracing::debug!("connection established");
    Ok(conn)
}

/// Close `conn` and hand back `result`.
///
/// A failure in `result` takes precedence; a close error is only reported
/// when the work itself succeeded.
pub async fn release<T>(conn: PgConnection, result: Result<T>) -> Result<T> {
    let closed = conn.close().await;

    match (result, closed) {
        (Ok(value), Ok(())) => {
            tracing::debug!("connection closed");
            Ok(value)
        }
        (Ok(_), Err(err)) => Err(err.into()),
        (Err(err), closed) => {
            if let Err(close_err) = closed {
                tracing::warn!(error = %close_err, "failed to close connection after error");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p bookshelf-db -- --ignored

    async fn open() -> PgConnection {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        connect(&DbConfig::Url(url)).await.expect("connect failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connection_executes_query() {
        let mut conn = open().await;

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&mut conn)
            .await
            .expect("query failed");

        let value = release(conn, Ok(result.0)).await.unwrap();
        assert_eq!(value, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn release_keeps_body_error() {
        let conn = open().await;

        let result: Result<()> = Err(DbError::config("body failed"));
        let err = release(conn, result).await.unwrap_err();
        assert!(matches!(err, DbError::Config { .. }));
    }

    #[tokio::test]
    async fn unreachable_server_fails_to_connect() {
        let config = DbConfig::Url("postgres://nobody@127.0.0.1:1/none".into());
        let err = connect(&config).await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
