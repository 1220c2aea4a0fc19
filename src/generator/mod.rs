//! Template `INSERT` statement generation.
//!
//! Two modes share one column-resolution step:
//!
//! - **VALUES**: every destination column gets the dialect's "no value known"
//!   placeholder (`DEFAULT` on PostgreSQL, `NULL` elsewhere).
//! - **SELECT**: destination columns are fed from source columns of the same
//!   name, the first-listed source winning ties.
//!
//! ## Example
//!
//! ```rust,ignore
//! let db = Database::connect("postgresql://localhost/app").await?;
//! let sql = generate_select_insert(&db, "tab1", &["tab2", "tab3"], false, false).await?;
//! // INSERT INTO tab1 (
//! //   col1,
//! //   ...
//! // )
//! // SELECT
//! //   tab2.col1,  -- ==> col1
//! //   ...
//! // FROM tab2
//! // INNER JOIN tab3 ON (tab2.col1 = tab3.col1)
//! ```

pub mod compose;
pub mod index;
pub mod layout;

use crate::engine::Database;
use crate::error::{InsertWriterError, InsertWriterResult};
use crate::schema::{ColumnInfo, TableRef, fetch_columns};

pub use compose::Composer;
pub use index::SourceColumnIndex;
pub use layout::Layout;

/// A source table with its resolved columns.
#[derive(Debug, Clone)]
pub struct SourceTable {
    /// Name as supplied by the caller, possibly schema-qualified.
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

impl SourceTable {
    /// Name used to qualify column references (schema prefix dropped).
    pub fn reference_name(&self) -> String {
        TableRef::parse(&self.name).name
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.column_name == column)
    }
}

/// Everything needed to generate one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub destination: String,
    pub sources: Vec<String>,
    pub qualify: bool,
    pub cast: bool,
    pub tuples: usize,
    pub join_on: Vec<String>,
}

impl GenerationRequest {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            sources: Vec::new(),
            qualify: false,
            cast: false,
            tuples: 1,
            join_on: Vec::new(),
        }
    }

    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn qualify(mut self, qualify: bool) -> Self {
        self.qualify = qualify;
        self
    }

    pub fn cast(mut self, cast: bool) -> Self {
        self.cast = cast;
        self
    }

    pub fn tuples(mut self, tuples: usize) -> Self {
        self.tuples = tuples;
        self
    }

    pub fn join_on<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.join_on = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Source names with blank entries dropped; a blank source means "no source".
    pub fn source_names(&self) -> Vec<&str> {
        non_blank(&self.sources)
    }

    /// Reject parameter combinations no statement can satisfy.
    pub fn validate(&self) -> InsertWriterResult<()> {
        if self.destination.trim().is_empty() {
            return Err(InsertWriterError::invalid("destination table name is empty"));
        }
        check_tuples(self.tuples)?;
        if self.tuples > 1 && !self.source_names().is_empty() {
            return Err(InsertWriterError::invalid(
                "multiple VALUES tuples cannot be combined with source tables",
            ));
        }
        Ok(())
    }
}

/// Validate `request` and generate the statement it describes.
///
/// No sources selects VALUES mode; any source selects SELECT mode.
pub async fn generate(db: &Database, request: &GenerationRequest) -> InsertWriterResult<String> {
    request.validate()?;

    let sources = request.source_names();
    if sources.is_empty() {
        return generate_values_insert(db, &request.destination, request.tuples, request.cast)
            .await;
    }

    let columns = fetch_columns(db, &request.destination).await?;
    let sources = fetch_sources(db, &sources).await?;
    Composer::new(db.dialect())
        .with_cast(request.cast)
        .select_insert(
            &request.destination,
            &columns,
            &sources,
            request.qualify,
            &request.join_on,
        )
}

/// Generate an `INSERT INTO ... VALUES` statement.
///
/// # Arguments
///
/// * `destination` - table to insert into
/// * `tuples` - number of tuples in the `VALUES` clause, at least 1
/// * `cast` - cast each placeholder to the destination column type
pub async fn generate_values_insert(
    db: &Database,
    destination: &str,
    tuples: usize,
    cast: bool,
) -> InsertWriterResult<String> {
    check_tuples(tuples)?;
    let columns = fetch_columns(db, destination).await?;
    Ok(Composer::new(db.dialect())
        .with_cast(cast)
        .values_insert(destination, &columns, tuples))
}

/// Generate an `INSERT INTO ... SELECT ... FROM` statement.
///
/// Blank source names are ignored; with no source left this is a
/// single-tuple VALUES statement.
///
/// # Arguments
///
/// * `destination` - table to insert into
/// * `sources` - tables to select from, in order of preference
/// * `qualify` - qualify column names with the table name even for one source
/// * `cast` - cast values whose type differs from the destination column
pub async fn generate_select_insert<S: AsRef<str>>(
    db: &Database,
    destination: &str,
    sources: &[S],
    qualify: bool,
    cast: bool,
) -> InsertWriterResult<String> {
    let sources = non_blank(sources);
    if sources.is_empty() {
        return generate_values_insert(db, destination, 1, cast).await;
    }

    let columns = fetch_columns(db, destination).await?;
    let sources = fetch_sources(db, &sources).await?;
    Composer::new(db.dialect())
        .with_cast(cast)
        .select_insert(destination, &columns, &sources, qualify, &[])
}

fn non_blank<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.trim().is_empty())
        .collect()
}

fn check_tuples(tuples: usize) -> InsertWriterResult<()> {
    if tuples == 0 {
        return Err(InsertWriterError::invalid("number of tuples must be at least 1"));
    }
    Ok(())
}

/// Fetch every source, last-listed first, returning them in caller order.
async fn fetch_sources<S: AsRef<str>>(
    db: &Database,
    names: &[S],
) -> InsertWriterResult<Vec<SourceTable>> {
    let mut sources = Vec::with_capacity(names.len());
    for name in names.iter().rev() {
        let name = name.as_ref();
        let columns = fetch_columns(db, name).await?;
        sources.push(SourceTable {
            name: name.to_string(),
            columns,
        });
    }
    sources.reverse();
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req = GenerationRequest::new("tab1");
        assert_eq!(req.tuples, 1);
        assert!(req.sources.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_tuples_with_sources() {
        let req = GenerationRequest::new("tab1").sources(["tab2"]).tuples(2);
        assert!(matches!(
            req.validate(),
            Err(InsertWriterError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_request_rejects_zero_tuples_and_blank_destination() {
        assert!(GenerationRequest::new("tab1").tuples(0).validate().is_err());
        assert!(GenerationRequest::new("  ").validate().is_err());
    }

    #[test]
    fn test_blank_sources_mean_no_source() {
        let req = GenerationRequest::new("tab1").sources(["", "  "]).tuples(3);
        assert!(req.source_names().is_empty());
        assert!(req.validate().is_ok());

        let req = GenerationRequest::new("tab1").sources(["tab2", ""]);
        assert_eq!(req.source_names(), vec!["tab2"]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_source_reference_name() {
        let source = SourceTable {
            name: "staging.tab2".to_string(),
            columns: vec![ColumnInfo::new("tab2", "col1", "integer")],
        };
        assert_eq!(source.reference_name(), "tab2");
        assert!(source.has_column("col1"));
        assert!(!source.has_column("col2"));
    }
}
