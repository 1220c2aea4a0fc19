//! SQL text assembly.
//!
//! Pure functions over already-fetched column metadata; no database access.

use super::SourceTable;
use super::index::SourceColumnIndex;
use super::layout::Layout;
use crate::dialect::{Dialect, SqlDialect};
use crate::error::{InsertWriterError, InsertWriterResult};
use crate::schema::ColumnInfo;

/// Builds `INSERT` statements for one dialect.
pub struct Composer {
    dialect: Dialect,
    rules: Box<dyn SqlDialect>,
    layout: Layout,
    cast: bool,
}

impl Composer {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            rules: dialect.generator(),
            layout: Layout::default(),
            cast: false,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Cast values to the destination column types.
    pub fn with_cast(mut self, cast: bool) -> Self {
        self.cast = cast;
        self
    }

    /// `INSERT INTO ... VALUES` with `tuples` identical placeholder tuples.
    pub fn values_insert(&self, destination: &str, columns: &[ColumnInfo], tuples: usize) -> String {
        let mut uncast = 0;
        let exprs: Vec<String> = columns
            .iter()
            .map(|dest| {
                let expr = self.rules.no_value().to_string();
                if self.cast {
                    self.cast_to(expr, &dest.data_type, &mut uncast)
                } else {
                    expr
                }
            })
            .collect();
        self.report_uncast(uncast);

        let tuple = format!("(\n{}\n)", self.value_block(columns, &exprs));
        let tuples = vec![tuple; tuples].join(",\n");

        format!(
            "\nINSERT INTO {} (\n{}\n)\nVALUES\n{}",
            destination,
            self.column_block(columns),
            tuples
        )
    }

    /// `INSERT INTO ... SELECT ... FROM` mapping source columns by name.
    ///
    /// Sources are listed in order of preference. With more than one source
    /// every matched column is table-qualified regardless of `qualify`.
    pub fn select_insert(
        &self,
        destination: &str,
        columns: &[ColumnInfo],
        sources: &[SourceTable],
        qualify: bool,
        join_on: &[String],
    ) -> InsertWriterResult<String> {
        let from_clause = from_clause(sources, join_on)?;
        let qualify = qualify || sources.len() > 1;
        let index = SourceColumnIndex::build(sources);
        tracing::debug!(
            "Indexed {} lookup key(s) from {} source(s)",
            index.len(),
            sources.len()
        );

        let mut uncast = 0;
        let mut exprs = Vec::with_capacity(columns.len());
        for dest in columns {
            let source_col = index.get(&dest.column_name);
            let expr = match source_col {
                Some(src) if qualify => format!("{}.{}", src.table_name, src.column_name),
                Some(src) => src.column_name.clone(),
                None => self.rules.no_value().to_string(),
            };
            let needs_cast =
                self.cast && source_col.is_none_or(|src| src.data_type != dest.data_type);
            exprs.push(if needs_cast {
                self.cast_to(expr, &dest.data_type, &mut uncast)
            } else {
                expr
            });
        }
        self.report_uncast(uncast);

        Ok(format!(
            "\nINSERT INTO {} (\n{}\n)\nSELECT\n{}\nFROM {}",
            destination,
            self.column_block(columns),
            self.value_block(columns, &exprs),
            from_clause
        ))
    }

    fn column_block(&self, columns: &[ColumnInfo]) -> String {
        columns
            .iter()
            .map(|col| self.layout.column_line(&col.column_name))
            .collect::<Vec<_>>()
            .join(",\n")
    }

    fn value_block(&self, columns: &[ColumnInfo], exprs: &[String]) -> String {
        let last = columns.len().saturating_sub(1);
        columns
            .iter()
            .zip(exprs)
            .enumerate()
            .map(|(i, (col, expr))| self.layout.value_line(expr, i == last, &col.column_name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn cast_to(&self, expr: String, data_type: &str, uncast: &mut usize) -> String {
        match self.rules.cast(&expr, data_type) {
            Some(cast) => cast,
            None => {
                *uncast += 1;
                expr
            }
        }
    }

    fn report_uncast(&self, uncast: usize) {
        if uncast > 0 {
            tracing::warn!(
                "{} has no cast rule; left {} expression(s) uncast",
                self.dialect,
                uncast
            );
        }
    }
}

/// First source, then one `INNER JOIN` per later source.
fn from_clause(sources: &[SourceTable], join_on: &[String]) -> InsertWriterResult<String> {
    let Some((first, rest)) = sources.split_first() else {
        return Err(InsertWriterError::invalid(
            "at least one source table is required",
        ));
    };

    let left = first.reference_name();
    let mut lines = vec![first.name.clone()];
    for next in rest {
        let right = next.reference_name();
        let predicate = join_keys(first, next, join_on)?
            .iter()
            .map(|key| format!("{}.{} = {}.{}", left, key, right, key))
            .collect::<Vec<_>>()
            .join(" AND ");
        lines.push(format!("INNER JOIN {} ON ({})", next.name, predicate));
    }
    Ok(lines.join("\n"))
}

/// Explicit join columns must exist on both sides. Without them the first
/// column of the first source is used when the joined table also has it.
fn join_keys(
    first: &SourceTable,
    next: &SourceTable,
    join_on: &[String],
) -> InsertWriterResult<Vec<String>> {
    let missing = || InsertWriterError::missing_join_key(&first.name, &next.name);

    if !join_on.is_empty() {
        if join_on
            .iter()
            .all(|key| first.has_column(key) && next.has_column(key))
        {
            return Ok(join_on.to_vec());
        }
        return Err(missing());
    }

    match first.columns.first() {
        Some(col) if next.has_column(&col.column_name) => Ok(vec![col.column_name.clone()]),
        _ => Err(missing()),
    }
}
