//! Text layout of generated statements.

/// Indentation of column and value lines.
pub const INDENT: &str = "  ";

/// Marker opening the trailing comment that names the fed destination column.
pub const COMMENT_MARKER: &str = "-- ==>";

/// Whitespace and comment conventions used by the composer.
///
/// The defaults are what downstream consumers expect; change them only for
/// output nobody else parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub indent: &'static str,
    pub comment_marker: &'static str,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            indent: INDENT,
            comment_marker: COMMENT_MARKER,
        }
    }
}

impl Layout {
    /// One line of the destination column list.
    pub(crate) fn column_line(&self, column: &str) -> String {
        format!("{}{}", self.indent, column)
    }

    /// One line of a value/select block, commented with its destination column.
    pub(crate) fn value_line(&self, expr: &str, last: bool, column: &str) -> String {
        let comma = if last { "" } else { "," };
        format!(
            "{}{}{}  {} {}",
            self.indent, expr, comma, self.comment_marker, column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_lines() {
        let layout = Layout::default();
        assert_eq!(layout.value_line("DEFAULT", false, "col1"), "  DEFAULT,  -- ==> col1");
        assert_eq!(layout.value_line("DEFAULT", true, "col4"), "  DEFAULT  -- ==> col4");
        assert_eq!(layout.column_line("col1"), "  col1");
    }
}
