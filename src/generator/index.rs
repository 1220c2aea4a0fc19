//! Lookup of source columns by destination column name.

use std::collections::HashMap;

use super::SourceTable;
use crate::schema::ColumnInfo;

/// Maps candidate destination column names to the source column supplying them.
///
/// Each source column is registered under `{table}{column}`,
/// `{table}_{column}` and the bare `{column}`. Sources are folded last to
/// first, so on a key collision the earliest-listed source wins.
#[derive(Debug, Default)]
pub struct SourceColumnIndex<'a> {
    entries: HashMap<String, &'a ColumnInfo>,
}

impl<'a> SourceColumnIndex<'a> {
    pub fn build(sources: &'a [SourceTable]) -> Self {
        let mut entries = HashMap::new();
        for source in sources.iter().rev() {
            for col in &source.columns {
                for key in candidate_keys(col) {
                    entries.insert(key, col);
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, column_name: &str) -> Option<&'a ColumnInfo> {
        self.entries.get(column_name).copied()
    }

    /// Number of distinct lookup keys.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

fn candidate_keys(col: &ColumnInfo) -> [String; 3] {
    [
        format!("{}{}", col.table_name, col.column_name),
        format!("{}_{}", col.table_name, col.column_name),
        col.column_name.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, cols: &[&str]) -> SourceTable {
        SourceTable {
            name: name.to_string(),
            columns: cols
                .iter()
                .map(|c| ColumnInfo::new(name, *c, "text"))
                .collect(),
        }
    }

    #[test]
    fn test_first_source_wins() {
        let sources = vec![source("a", &["x"]), source("b", &["x", "y"])];
        let index = SourceColumnIndex::build(&sources);

        assert_eq!(index.get("x").unwrap().table_name, "a");
        assert_eq!(index.get("y").unwrap().table_name, "b");
        assert!(index.get("z").is_none());
    }

    #[test]
    fn test_prefixed_keys() {
        let sources = vec![source("person", &["id", "name"])];
        let index = SourceColumnIndex::build(&sources);

        assert_eq!(index.get("person_id").unwrap().column_name, "id");
        assert_eq!(index.get("personname").unwrap().column_name, "name");
        assert_eq!(index.len(), 6);
    }

    #[test]
    fn test_shared_bare_key_counted_once() {
        let sources = vec![source("a", &["x"]), source("b", &["x"])];
        let index = SourceColumnIndex::build(&sources);

        // ax, a_x, bx, b_x and one shared x
        assert_eq!(index.len(), 5);
        assert_eq!(index.get("b_x").unwrap().table_name, "b");
    }
}
