//! SQL dialects recognised from a connection URL.
//!
//! The scheme of the URL (`postgresql://`, `sqlite:///`, `mysql://`) selects
//! the dialect. SQLAlchemy-style driver suffixes (`postgresql+psycopg2://`)
//! are accepted and stripped.

pub mod mysql;
pub mod postgres;
pub mod sqlite;
pub mod traits;

use std::fmt;

use crate::error::{InsertWriterError, InsertWriterResult};

pub use mysql::MysqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use traits::SqlDialect;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySQL,
    SQLite,
}

impl Dialect {
    /// Determine the dialect from a connection URL.
    ///
    /// ```
    /// use sql_insert_writer::dialect::Dialect;
    ///
    /// let dialect = Dialect::from_url("postgres+psycopg2://localhost/app").unwrap();
    /// assert_eq!(dialect, Dialect::Postgres);
    /// ```
    pub fn from_url(url: &str) -> InsertWriterResult<Self> {
        match engine_name(url).as_str() {
            "postgresql" => Ok(Dialect::Postgres),
            "mysql" | "mariadb" => Ok(Dialect::MySQL),
            "sqlite" => Ok(Dialect::SQLite),
            other => Err(InsertWriterError::UnsupportedDialect(other.to_string())),
        }
    }

    pub fn generator(&self) -> Box<dyn SqlDialect> {
        match self {
            Dialect::Postgres => Box::new(PostgresDialect),
            Dialect::MySQL => Box::new(MysqlDialect),
            Dialect::SQLite => Box::new(SqliteDialect),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::Postgres => "postgresql",
            Dialect::MySQL => "mysql",
            Dialect::SQLite => "sqlite",
        };
        write!(f, "{}", name)
    }
}

/// Engine name of a URL: the scheme without driver suffix, `postgres` spelled out.
fn engine_name(url: &str) -> String {
    let scheme = url.split(':').next().unwrap_or_default();
    let engine = scheme.split('+').next().unwrap_or_default().to_lowercase();
    if engine == "postgres" {
        "postgresql".to_string()
    } else {
        engine
    }
}

/// Remove a `+driver` suffix from the URL scheme so the URL can be handed to sqlx.
pub fn normalize_url(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) if scheme.contains('+') => {
            let base = scheme.split('+').next().unwrap_or_default();
            format!("{}://{}", base, rest)
        }
        _ => url.to_string(),
    }
}
