//! Markdown to Confluence storage format converter.
//!
//! Handles a deliberately small markdown dialect in a single pass:
//!
//! - `#`, `##`, `###` headers
//! - `- ` unordered list items (no nesting)
//! - pipe tables with a separator row
//! - paragraphs, one per line
//! - `**bold**` and `*italic*` inside any of the above
//!
//! The output uses only `h1`-`h3`, `ul`, `li`, `p`, `strong`, `em`, `table`,
//! `tbody`, `tr`, `th` and `td`, with no attributes. Apart from `&`, which
//! [`normalize`] rewrites to `and`, no XML escaping is performed.
//!
//! # Example
//!
//! ```
//! use confmark_converter::convert;
//!
//! let markup = convert("# Title\n\n- one\n- two\n\nSome *text*.");
//! assert_eq!(
//!     markup,
//!     "<h1>Title</h1><ul><li>one</li><li>two</li></ul><p>Some <em>text</em>.</p>"
//! );
//! ```

mod inline;
mod normalize;
mod scanner;
mod table;

pub use inline::{format_inline, strip_inline};
pub use normalize::normalize;
pub use scanner::{LineKind, classify};
pub use table::{ParsedTable, is_separator_row, parse_table, split_cells};

/// Result of [`convert_with_title`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Text of the first level-1 header with emphasis markers removed, if any.
    pub title: Option<String>,
    /// Storage format markup.
    pub markup: String,
}

/// Convert markdown to Confluence storage markup.
///
/// Never fails: anything that is not a recognized block becomes a paragraph.
#[must_use]
pub fn convert(markdown: &str) -> String {
    convert_with_title(markdown).markup
}

/// Convert markdown and report the first level-1 header as a page title.
///
/// The title is plain text: `# Release **notes**` gives `Release notes`.
/// The header is still rendered, with its formatting, in the markup.
#[must_use]
pub fn convert_with_title(markdown: &str) -> Conversion {
    let normalized = normalize(markdown);
    let scanned = scanner::scan(&normalized);
    Conversion {
        title: scanned.title,
        markup: scanned.markup,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    use super::*;

    /// Assert that markup is a balanced sequence of elements.
    fn assert_well_formed(markup: &str) {
        let wrapped = format!("<root>{markup}</root>");
        let mut reader = Reader::from_str(&wrapped);
        reader.config_mut().check_end_names = true;
        let mut depth = 0usize;
        loop {
            match reader.read_event() {
                Ok(Event::Start(_)) => depth += 1,
                Ok(Event::End(_)) => depth -= 1,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("malformed markup {markup:?}: {e}"),
            }
        }
        assert_eq!(depth, 0, "unbalanced markup {markup:?}");
    }

    #[test]
    fn test_header_blank_paragraph() {
        assert_eq!(
            convert("# Title\n\nSome *text*."),
            "<h1>Title</h1><p>Some <em>text</em>.</p>"
        );
    }

    #[test]
    fn test_header_levels() {
        assert_eq!(
            convert("# One\n## Two\n### Three"),
            "<h1>One</h1><h2>Two</h2><h3>Three</h3>"
        );
    }

    #[test]
    fn test_header_inline_formatting() {
        assert_eq!(
            convert("## The **big** one"),
            "<h2>The <strong>big</strong> one</h2>"
        );
    }

    #[test]
    fn test_list_closed_by_blank_line() {
        assert_eq!(
            convert("- one\n- two\n\nDone"),
            "<ul><li>one</li><li>two</li></ul><p>Done</p>"
        );
    }

    #[test]
    fn test_list_closed_at_end_of_input() {
        assert_eq!(
            convert("Intro\n- a\n- *b*"),
            "<p>Intro</p><ul><li>a</li><li><em>b</em></li></ul>"
        );
    }

    #[test]
    fn test_list_closed_by_paragraph() {
        assert_eq!(
            convert("- a\nafter"),
            "<ul><li>a</li></ul><p>after</p>"
        );
    }

    #[test]
    fn test_list_closed_by_header() {
        assert_eq!(
            convert("- a\n# H\n- b"),
            "<ul><li>a</li></ul><h1>H</h1><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_list_interrupted_by_blank_line_reopens() {
        assert_eq!(
            convert("- a\n\n- b"),
            "<ul><li>a</li></ul><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_list_closed_by_table() {
        assert_eq!(
            convert("- a\n| X |\n|---|\n| 1 |"),
            "<ul><li>a</li></ul><table><tbody><tr><th>X</th></tr><tr><td>1</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_list_closed_by_pipe_text() {
        assert_eq!(
            convert("- a\nx | y"),
            "<ul><li>a</li></ul><p>x  |  y</p>"
        );
    }

    #[test]
    fn test_simple_table() {
        assert_eq!(
            convert("A | B\n---|---\n1 | 2"),
            "<table><tbody><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_table_rows_not_reprocessed() {
        let markup = convert("| A |\n|---|\n| 1 |\n| 2 |\n\nEnd");
        assert_eq!(
            markup,
            "<table><tbody><tr><th>A</th></tr><tr><td>1</td></tr><tr><td>2</td></tr></tbody></table><p>End</p>"
        );
        assert_eq!(markup.matches("<table>").count(), 1);
        assert!(!markup.contains("<p>| 1"));
    }

    #[test]
    fn test_table_followed_directly_by_paragraph() {
        assert_eq!(
            convert("| A |\n|---|\n| 1 |\nplain"),
            "<table><tbody><tr><th>A</th></tr><tr><td>1</td></tr></tbody></table><p>plain</p>"
        );
    }

    #[test]
    fn test_consecutive_tables_separated_by_blank_line() {
        let markup = convert("| A |\n|---|\n| 1 |\n\n| B |\n|---|\n| 2 |");
        assert_eq!(markup.matches("<table>").count(), 2);
        assert_eq!(markup.matches("</table>").count(), 2);
    }

    #[test]
    fn test_pipe_text_without_separator() {
        assert_eq!(
            convert("Price: $5 | $10 item"),
            "<p>Price: $5  |  $10 item</p>"
        );
    }

    #[test]
    fn test_pipe_text_skips_inline_formatting() {
        assert_eq!(
            convert("**a** | *b*"),
            "<p>**a**  |  *b*</p>"
        );
    }

    #[test]
    fn test_lone_separator_is_paragraph() {
        assert_eq!(convert("---|---"), "<p>---|---</p>");
    }

    #[test]
    fn test_normalization_applies_everywhere() {
        assert_eq!(
            convert("# Q&A\n- it\u{2019}s \u{201C}fine\u{201D}\nA \u{2013} B"),
            "<h1>QandA</h1><ul><li>it's \"fine\"</li></ul><p>A - B</p>"
        );
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(
            convert("# Title\r\n\r\n- a\r\n"),
            "<h1>Title</h1><ul><li>a</li></ul>"
        );
    }

    #[test]
    fn test_lines_are_trimmed() {
        assert_eq!(
            convert("   indented text   \n  - item"),
            "<p>indented text</p><ul><li>item</li></ul>"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert(""), "");
        assert_eq!(convert("\n\n  \n"), "");
    }

    #[test]
    fn test_angle_brackets_pass_through() {
        assert_eq!(convert("a <b> c"), "<p>a <b> c</p>");
    }

    #[test]
    fn test_convert_with_title() {
        let conversion = convert_with_title("# Release **notes**\n\nBody");
        assert_eq!(conversion.title.as_deref(), Some("Release notes"));
        assert_eq!(
            conversion.markup,
            "<h1>Release <strong>notes</strong></h1><p>Body</p>"
        );
    }

    #[test]
    fn test_markup_is_balanced() {
        let inputs = [
            "# Title\n\n- one\n- two\n\nDone",
            "- a\n- b",
            "- a\n| X | Y |\n|---|---|\n| 1 | 2 |\n- c",
            "text | more\n- item\n\n\n## H",
            "| A |\n|---|\n\n- x\n- **y**",
            "**a*b*c** and *d*",
        ];
        for input in inputs {
            assert_well_formed(&convert(input));
        }
    }

    #[test]
    fn test_list_open_close_counts_match() {
        let inputs = [
            "- a",
            "- a\n- b\n\n- c\nx\n- d",
            "- a\n# h\n- b\n| p | q |\n|---|---|\n- c",
            "\n\n- a\n\n\n",
            "- a\n| not | table",
        ];
        for input in inputs {
            let markup = convert(input);
            assert_eq!(
                markup.matches("<ul>").count(),
                markup.matches("</ul>").count(),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_deterministic() {
        let input = "# T\n- a\n| A |\n|---|\n| 1 |\n*x*";
        assert_eq!(convert(input), convert(input));
    }
}
