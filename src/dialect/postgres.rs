use super::traits::SqlDialect;

pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn columns_query(&self, schema_qualified: bool) -> &'static str {
        // information_schema exposes sql_identifier domains; cast so every driver reads text.
        // Enum, domain and array columns report a generic data_type, so name the real type.
        if schema_qualified {
            "SELECT c.column_name::text, \
               CASE c.data_type \
                 WHEN 'USER-DEFINED' THEN c.udt_schema::text || '.' || c.udt_name::text \
                 WHEN 'ARRAY' THEN substr(c.udt_name::text, 2) || '[]' \
                 ELSE c.data_type::text END \
             FROM information_schema.columns c \
             WHERE c.table_name = $1 AND c.table_schema = $2 \
             ORDER BY c.ordinal_position"
        } else {
            // first schema on the search path that holds the table
            "SELECT c.column_name::text, \
               CASE c.data_type \
                 WHEN 'USER-DEFINED' THEN c.udt_schema::text || '.' || c.udt_name::text \
                 WHEN 'ARRAY' THEN substr(c.udt_name::text, 2) || '[]' \
                 ELSE c.data_type::text END \
             FROM information_schema.columns c \
             JOIN unnest(current_schemas(false)) WITH ORDINALITY AS s(name, pos) \
               ON c.table_schema::text = s.name::text \
             WHERE c.table_name = $1 \
               AND s.pos = ( \
                 SELECT min(p.pos) \
                 FROM information_schema.columns t \
                 JOIN unnest(current_schemas(false)) WITH ORDINALITY AS p(name, pos) \
                   ON t.table_schema::text = p.name::text \
                 WHERE t.table_name = $1) \
             ORDER BY c.ordinal_position"
        }
    }

    fn no_value(&self) -> &'static str {
        "DEFAULT"
    }

    fn cast(&self, expr: &str, data_type: &str) -> Option<String> {
        Some(format!("{}::{}", expr, data_type))
    }
}
