//! Line-by-line block scanner.
//!
//! Each line is classified by [`classify`] and rendered immediately. The only
//! state carried between lines is whether a `<ul>` is open. Tables are the one
//! construct spanning several lines; the scanner hands them to
//! [`parse_table`] and resumes after the last line it consumed.

use std::sync::LazyLock;

use regex::Regex;

use crate::inline::{format_inline, strip_inline};
use crate::table::{is_separator_row, parse_table};

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3})\s(.*)$").unwrap());

/// Block-level classification of a single line.
///
/// Variants are listed in match priority: the first that applies wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// `#`, `##` or `###` header.
    Header {
        /// Header level, 1 to 3.
        level: u8,
        /// Header text with marker and surrounding whitespace removed.
        text: &'a str,
    },
    /// `- item` line. Holds the text after the marker.
    ListItem(&'a str),
    /// Header row of a table: contains `|` and is followed by a separator row.
    TableStart,
    /// Line with a `|` that is not followed by a separator row.
    PipeText(&'a str),
    /// Anything else.
    Paragraph(&'a str),
}

/// Classify `lines[cursor]`, looking ahead one line for table separators.
///
/// # Panics
///
/// Panics if `cursor` is out of bounds.
#[must_use]
pub fn classify<'a>(lines: &[&'a str], cursor: usize) -> LineKind<'a> {
    let line = lines[cursor].trim();

    if line.is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = HEADER_RE.captures(line) {
        let level = u8::try_from(caps[1].len()).unwrap_or(1);
        let text = caps.get(2).map_or("", |m| m.as_str().trim());
        return LineKind::Header { level, text };
    }

    if let Some(item) = line.strip_prefix("- ") {
        return LineKind::ListItem(item);
    }

    if line.contains('|') && !is_separator_only(line) {
        let next_is_separator = lines
            .get(cursor + 1)
            .is_some_and(|next| is_separator_row(next));
        return if next_is_separator {
            LineKind::TableStart
        } else {
            LineKind::PipeText(line)
        };
    }

    LineKind::Paragraph(line)
}

/// Dashes, colons, pipes and whitespace only.
fn is_separator_only(line: &str) -> bool {
    line.chars()
        .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace())
}

/// Output of a full scan.
pub(crate) struct Scanned {
    pub(crate) markup: String,
    pub(crate) title: Option<String>,
}

/// Streaming emitter for the block scanner.
struct BlockScanner {
    output: String,
    in_list: bool,
    title: Option<String>,
}

impl BlockScanner {
    fn new(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            in_list: false,
            title: None,
        }
    }

    /// Render the line at `cursor` and return the index of the next unread line.
    fn step(&mut self, lines: &[&str], cursor: usize) -> usize {
        match classify(lines, cursor) {
            LineKind::Blank => {
                // Blank lines emit an empty fragment; they only end a list.
                self.close_list();
            }
            LineKind::Header { level, text } => {
                self.close_list();
                if level == 1 && self.title.is_none() {
                    self.title = Some(strip_inline(text));
                }
                self.output.push_str(&format!(
                    "<h{level}>{}</h{level}>",
                    format_inline(text)
                ));
            }
            LineKind::ListItem(text) => {
                self.open_list();
                self.push_wrapped("li", &format_inline(text));
            }
            LineKind::TableStart => {
                self.close_list();
                let table = parse_table(lines, cursor);
                self.output.push_str(&table.markup);
                return table.last_line + 1;
            }
            LineKind::PipeText(text) => {
                self.close_list();
                // No inline formatting here, unlike ordinary paragraphs.
                self.push_wrapped("p", &text.replace('|', " | "));
            }
            LineKind::Paragraph(text) => {
                self.close_list();
                self.push_wrapped("p", &format_inline(text));
            }
        }
        cursor + 1
    }

    fn open_list(&mut self) {
        if !self.in_list {
            self.output.push_str("<ul>");
            self.in_list = true;
        }
    }

    fn close_list(&mut self) {
        if self.in_list {
            self.output.push_str("</ul>");
            self.in_list = false;
        }
    }

    fn push_wrapped(&mut self, tag: &str, content: &str) {
        self.output.push('<');
        self.output.push_str(tag);
        self.output.push('>');
        self.output.push_str(content);
        self.output.push_str("</");
        self.output.push_str(tag);
        self.output.push('>');
    }

    fn finish(mut self) -> Scanned {
        self.close_list();
        let markup = trim_stray_paragraph_tags(&self.output).to_owned();
        Scanned {
            markup,
            title: self.title,
        }
    }
}

/// Drop a dangling `</p>` at the start and an unclosed `<p>` at the end.
fn trim_stray_paragraph_tags(markup: &str) -> &str {
    let markup = markup.strip_prefix("</p>").unwrap_or(markup);
    markup.strip_suffix("<p>").unwrap_or(markup)
}

/// Scan normalized text into storage markup.
pub(crate) fn scan(text: &str) -> Scanned {
    let lines: Vec<&str> = text.lines().collect();
    let mut scanner = BlockScanner::new(text.len() + text.len() / 2);

    let mut cursor = 0;
    while cursor < lines.len() {
        cursor = scanner.step(&lines, cursor);
    }

    scanner.finish()
}
