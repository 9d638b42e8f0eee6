//! Connection settings
//!
//! Resolution order (highest first):
//! 1. a full connection URL (`--database-url` / `DATABASE_URL`, or `url` in the file)
//! 2. individual overrides (`--host`, `--port`, ... or `BOOKSHELF_DB_*`)
//! 3. `[database]` in `~/.bookshelf/config.toml`
//! 4. `localhost:5432`, database and user named after the OS user, empty password

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

use crate::error::{DbError, Result};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;

/// Contents of `~/.bookshelf/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookshelfConfig {
    pub database: DatabaseSection,
}

/// `[database]` table; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl BookshelfConfig {
    /// Config file path: ~/.bookshelf/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bookshelf/config.toml")
    }

    /// Load the default config file, falling back to defaults when it is absent.
    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load `path`; a missing file yields defaults, a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

/// Explicit overrides, usually straight from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbOverrides {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Individual connection parameters
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ConnectParams {
    /// Local server, database and user both named after `user`, no password.
    pub fn for_os_user(user: impl Into<String>) -> Self {
        let user = user.into();
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            database: user.clone(),
            username: user,
            password: String::new(),
        }
    }
}

/// Resolved connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbConfig {
    /// Full connection URL
    Url(String),
    Params(ConnectParams),
}

impl DbConfig {
    /// Defaults for the user running the process.
    pub fn from_os_user() -> Result<Self> {
        let user = os_user().ok_or_else(no_os_user)?;
        Ok(Self::Params(ConnectParams::for_os_user(user)))
    }

    /// Merge overrides, the config file and OS-user defaults.
    ///
    /// `os_user` is only consulted when neither the overrides nor the file
    /// name a user.
    pub fn resolve(
        overrides: &DbOverrides,
        file: &DatabaseSection,
        os_user: Option<String>,
    ) -> Result<Self> {
        if let Some(url) = overrides.url.as_ref().or(file.url.as_ref()) {
            return Ok(Self::Url(url.clone()));
        }

        let username = match overrides.username.as_ref().or(file.username.as_ref()) {
            Some(username) => username.clone(),
            None => os_user.ok_or_else(no_os_user)?,
        };
        let database = overrides
            .database
            .as_ref()
            .or(file.database.as_ref())
            .cloned()
            .unwrap_or_else(|| username.clone());

        Ok(Self::Params(ConnectParams {
            host: overrides
                .host
                .as_ref()
                .or(file.host.as_ref())
                .cloned()
                .unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            database,
            username,
            password: overrides
                .password
                .as_ref()
                .or(file.password.as_ref())
                .cloned()
                .unwrap_or_default(),
        }))
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        match self {
            Self::Url(url) => Ok(PgConnectOptions::from_str(url)?),
            Self::Params(p) => Ok(PgConnectOptions::new()
                .host(&p.host)
                .port(p.port)
                .database(&p.database)
                .username(&p.username)
                .password(&p.password)),
        }
    }
}

/// Render connect options as a URL for logs. Never includes the password.
pub fn display_url(options: &PgConnectOptions) -> String {
    format!(
        "postgres://{}@{}:{}/{}",
        options.get_username(),
        options.get_host(),
        options.get_port(),
        options.get_database().unwrap_or_default()
    )
}

/// Name of the user running the process.
///
/// Login environment variables first, then sqlx's own default, which reads
/// `PGUSER` and otherwise the account name of the process.
pub fn os_user() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty())
        .or_else(|| {
            let account = PgConnectOptions::new().get_username().to_owned();
            (!account.is_empty()).then_some(account)
        })
}

fn no_os_user() -> DbError {
    DbError::config("could not determine the current OS user; pass --user or set DATABASE_URL")
}
