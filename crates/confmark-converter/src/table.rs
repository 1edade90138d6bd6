//! Pipe table parsing.
//!
//! A table is a header row, a separator row of dashes and colons, and every
//! following non-blank line that contains a pipe.

use std::sync::LazyLock;

use regex::Regex;

use crate::inline::format_inline;
use crate::normalize::normalize;

static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\|?\s*[-:]+\s*(\|\s*[-:]+\s*)*\|?\s*$").unwrap()
});

/// Result of [`parse_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    /// Rendered `<table>` markup.
    pub markup: String,
    /// Index of the last line that belongs to the table.
    pub last_line: usize,
}

/// Whether `line` is a table separator row such as `|---|:--:|`.
#[must_use]
pub fn is_separator_row(line: &str) -> bool {
    SEPARATOR_RE.is_match(line)
}

/// Split a table row into trimmed cells.
///
/// An empty cell before a leading pipe or after a trailing pipe is dropped.
/// Interior empty cells are kept.
///
/// # Examples
///
/// ```
/// use confmark_converter::split_cells;
///
/// assert_eq!(split_cells("| a | | c |"), vec!["a", "", "c"]);
/// assert_eq!(split_cells("a|b"), vec!["a", "b"]);
/// ```
#[must_use]
pub fn split_cells(line: &str) -> Vec<String> {
    let mut parts: Vec<&str> = line.trim().split('|').collect();
    if parts.first().is_some_and(|p| p.is_empty()) {
        parts.remove(0);
    }
    if parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts.into_iter().map(|p| p.trim().to_owned()).collect()
}

/// Parse the table whose header row is `lines[start]`.
///
/// The line after the header is taken as the separator without being
/// inspected; callers check it with [`is_separator_row`] first. Body rows run
/// until the first blank or pipe-less line.
#[must_use]
pub fn parse_table(lines: &[&str], start: usize) -> ParsedTable {
    let header = lines.get(start).map(|l| split_cells(l)).unwrap_or_default();

    let mut rows = Vec::new();
    let mut cursor = start + 2;
    while let Some(line) = lines.get(cursor) {
        if line.trim().is_empty() || !line.contains('|') {
            break;
        }
        rows.push(split_cells(line));
        cursor += 1;
    }

    let mut markup = String::from("<table><tbody>");
    if !header.is_empty() {
        push_row(&mut markup, &header, "th");
    }
    for row in &rows {
        push_row(&mut markup, row, "td");
    }
    markup.push_str("</tbody></table>");

    ParsedTable {
        markup,
        last_line: cursor - 1,
    }
}

fn push_row(out: &mut String, cells: &[String], tag: &str) {
    out.push_str("<tr>");
    for cell in cells {
        // Input was already normalized as a whole; cells go through it again.
        let text = format_inline(&normalize(cell));
        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.push_str(&text);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    out.push_str("</tr>");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_separator_rows() {
        assert!(is_separator_row("---|---"));
        assert!(is_separator_row("|---|---|"));
        assert!(is_separator_row("  | :--- | :---: | ---: |  "));
        assert!(is_separator_row("-"));
        assert!(is_separator_row(":-:"));
        assert!(is_separator_row("---|"));
        assert!(is_separator_row("|---"));
    }

    #[test]
    fn test_non_separator_rows() {
        assert!(!is_separator_row("a | b"));
        assert!(!is_separator_row("|"));
        assert!(!is_separator_row("||"));
        assert!(!is_separator_row("-- - | --"));
        assert!(!is_separator_row(""));
    }

    #[test]
    fn test_split_cells_outer_pipes() {
        assert_eq!(split_cells("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_cells("  | a | b |  "), vec!["a", "b"]);
    }

    #[test]
    fn test_split_cells_no_outer_pipes() {
        assert_eq!(split_cells("a | b"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_cells_keeps_interior_empty_cells() {
        assert_eq!(split_cells("| a || c |"), vec!["a", "", "c"]);
        assert_eq!(split_cells("| | b |"), vec!["", "b"]);
    }

    #[test]
    fn test_split_cells_only_pipes() {
        assert!(split_cells("|").is_empty());
        assert_eq!(split_cells("||"), vec![""]);
    }

    #[test]
    fn test_parse_simple_table() {
        let lines = ["A | B", "---|---", "1 | 2"];
        let table = parse_table(&lines, 0);
        assert_eq!(
            table.markup,
            "<table><tbody><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
        assert_eq!(table.last_line, 2);
    }

    #[test]
    fn test_parse_stops_at_blank_line() {
        let lines = ["| A |", "|---|", "| 1 |", "| 2 |", "", "| 3 |"];
        let table = parse_table(&lines, 0);
        assert_eq!(table.last_line, 3);
        assert_eq!(table.markup.matches("<td>").count(), 2);
        assert!(!table.markup.contains('3'));
    }

    #[test]
    fn test_parse_stops_at_pipe_less_line() {
        let lines = ["intro", "| A |", "|---|", "| 1 |", "after"];
        let table = parse_table(&lines, 1);
        assert_eq!(table.last_line, 3);
    }

    #[test]
    fn test_parse_header_only() {
        let lines = ["| A | B |", "|---|---|"];
        let table = parse_table(&lines, 0);
        assert_eq!(
            table.markup,
            "<table><tbody><tr><th>A</th><th>B</th></tr></tbody></table>"
        );
        assert_eq!(table.last_line, 1);
    }

    #[test]
    fn test_parse_ragged_rows_preserved() {
        let lines = ["| A | B |", "|---|---|", "| 1 |", "| 1 | 2 | 3 |"];
        let table = parse_table(&lines, 0);
        assert_eq!(
            table.markup,
            "<table><tbody><tr><th>A</th><th>B</th></tr>\
             <tr><td>1</td></tr>\
             <tr><td>1</td><td>2</td><td>3</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_parse_empty_header_emits_no_header_row() {
        let lines = ["|", "|---|", "| 1 |"];
        let table = parse_table(&lines, 0);
        assert_eq!(
            table.markup,
            "<table><tbody><tr><td>1</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_parse_cells_are_formatted() {
        let lines = ["| **Name** | *Note* |", "|---|---|", "| a | x **y** |"];
        let table = parse_table(&lines, 0);
        assert_eq!(
            table.markup,
            "<table><tbody><tr><th><strong>Name</strong></th><th><em>Note</em></th></tr>\
             <tr><td>a</td><td>x <strong>y</strong></td></tr></tbody></table>"
        );
    }

    // Cells are normalized a second time. This is redundant after the
    // document-level pass but changes nothing; candidate for removal.
    #[test]
    fn test_parse_cells_are_renormalized() {
        let lines = ["| Q\u{2019}s |", "|---|", "| R&D \u{2014} ok |"];
        let table = parse_table(&lines, 0);
        assert_eq!(
            table.markup,
            "<table><tbody><tr><th>Q's</th></tr><tr><td>RandD - ok</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_parse_separator_is_not_inspected() {
        let lines = ["| A |", "not a separator", "| 1 |"];
        let table = parse_table(&lines, 0);
        assert_eq!(table.last_line, 2);
        assert!(!table.markup.contains("separator"));
    }
}
