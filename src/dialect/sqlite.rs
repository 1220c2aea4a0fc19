use super::traits::SqlDialect;

pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn columns_query(&self, schema_qualified: bool) -> &'static str {
        // PRAGMA statements take no parameters; the table-valued form does.
        // A missing table yields zero rows rather than an error.
        if schema_qualified {
            "SELECT name, type FROM pragma_table_info(?1, ?2) ORDER BY cid"
        } else {
            "SELECT name, type FROM pragma_table_info(?1) ORDER BY cid"
        }
    }

    fn no_value(&self) -> &'static str {
        "NULL"
    }

    fn cast(&self, _expr: &str, _data_type: &str) -> Option<String> {
        None
    }
}
