//! Dialect traits.

/// Per-dialect rules for metadata lookup and generated literals.
pub trait SqlDialect {
    /// Query returning `(column_name, data_type)` rows in ordinal order.
    ///
    /// The table name is always bound first. When `schema_qualified` is set,
    /// the schema name is bound second; otherwise the query falls back to the
    /// connection's current schema.
    fn columns_query(&self, schema_qualified: bool) -> &'static str;

    /// Value to insert when no value is known.
    fn no_value(&self) -> &'static str;

    /// Wrap `expr` in a conversion to `data_type`.
    /// Returns `None` when the dialect has no cast rule.
    fn cast(&self, expr: &str, data_type: &str) -> Option<String>;
}
