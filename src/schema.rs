//! Table metadata lookup.
//!
//! Reads the ordered column list of a table from the dialect's system
//! catalog: `information_schema.columns` on PostgreSQL and MySQL,
//! `pragma_table_info` on SQLite.

use std::fmt;

use sqlx::Row;

use crate::engine::Database;
use crate::error::{InsertWriterError, InsertWriterResult};

/// Metadata of one physical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A table name, optionally qualified by its schema (`schema.table`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    /// Split `schema.table` at the last dot.
    pub fn parse(input: &str) -> Self {
        match input.rsplit_once('.') {
            Some((schema, name)) if !schema.is_empty() && !name.is_empty() => Self {
                schema: Some(schema.to_string()),
                name: name.to_string(),
            },
            _ => Self {
                schema: None,
                name: input.to_string(),
            },
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Fetch the columns of `table` in ordinal order.
///
/// Fails with [`InsertWriterError::UnknownTable`] when the table has no
/// columns, which is how every supported catalog reports a missing table.
pub async fn fetch_columns(db: &Database, table: &str) -> InsertWriterResult<Vec<ColumnInfo>> {
    let table_ref = TableRef::parse(table);
    let dialect = db.dialect().generator();
    let sql = dialect.columns_query(table_ref.schema.is_some());

    tracing::debug!("Fetching columns of {} ({})", table_ref, db.dialect());

    let mut query = sqlx::query(sql).bind(table_ref.name.as_str());
    if let Some(schema) = &table_ref.schema {
        query = query.bind(schema.as_str());
    }

    let rows = query
        .fetch_all(db.pool())
        .await
        .map_err(|e| InsertWriterError::Query(e.to_string()))?;

    let columns = rows
        .iter()
        .map(|row| {
            let column_name: String = row.try_get(0)?;
            let data_type: String = row.try_get(1)?;
            Ok(ColumnInfo::new(&table_ref.name, column_name, data_type))
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(|e| InsertWriterError::Query(e.to_string()))?;

    if columns.is_empty() {
        return Err(InsertWriterError::UnknownTable(table.to_string()));
    }

    tracing::debug!("{} has {} column(s)", table_ref, columns.len());
    Ok(columns)
}
