use super::traits::SqlDialect;

pub struct MysqlDialect;

impl SqlDialect for MysqlDialect {
    fn columns_query(&self, schema_qualified: bool) -> &'static str {
        if schema_qualified {
            "SELECT CAST(COLUMN_NAME AS CHAR), CAST(DATA_TYPE AS CHAR) \
             FROM information_schema.COLUMNS \
             WHERE TABLE_NAME = ? AND TABLE_SCHEMA = ? \
             ORDER BY ORDINAL_POSITION"
        } else {
            // no default database selected: search every schema
            "SELECT CAST(COLUMN_NAME AS CHAR), CAST(DATA_TYPE AS CHAR) \
             FROM information_schema.COLUMNS \
             WHERE TABLE_NAME = ? AND TABLE_SCHEMA = COALESCE(DATABASE(), TABLE_SCHEMA) \
             ORDER BY ORDINAL_POSITION"
        }
    }

    fn no_value(&self) -> &'static str {
        "NULL"
    }

    fn cast(&self, expr: &str, data_type: &str) -> Option<String> {
        Some(format!("CAST({} AS {})", expr, data_type))
    }
}
