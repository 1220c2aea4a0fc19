//! Error types for sql-insert-writer.

use thiserror::Error;

/// The main error type for statement generation.
#[derive(Debug, Error)]
pub enum InsertWriterError {
    /// The connection URL scheme maps to no known dialect.
    #[error("{0} not supported")]
    UnsupportedDialect(String),

    /// A named table resolved to zero columns.
    #[error("No table {0} in database")]
    UnknownTable(String),

    /// No column is available to join two source tables on.
    #[error("No join column shared by {left} and {right}")]
    MissingJoinKey { left: String, right: String },

    /// The caller supplied an inconsistent set of parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Metadata query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InsertWriterError {
    /// Create a missing join key error for the pair of tables being joined.
    pub fn missing_join_key(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::MissingJoinKey {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create an invalid request error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

/// Result type alias for sql-insert-writer operations.
pub type InsertWriterResult<T> = Result<T, InsertWriterError>;
