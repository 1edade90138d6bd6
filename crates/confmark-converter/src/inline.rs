//! Inline emphasis: `**bold**` and `*italic*`.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Bold span. The body is runs of non-asterisks joined by single asterisks,
/// so two bold spans on one line never merge and inner `*` stay literal.
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+(?:\*[^*]+)*)\*\*").unwrap());

static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

/// Opening and closing text written around each kind of span.
struct Emphasis {
    strong: (&'static str, &'static str),
    em: (&'static str, &'static str),
}

const TAGS: Emphasis = Emphasis {
    strong: ("<strong>", "</strong>"),
    em: ("<em>", "</em>"),
};

const PLAIN: Emphasis = Emphasis {
    strong: ("", ""),
    em: ("", ""),
};

/// Convert markdown emphasis to `<strong>` and `<em>` tags.
///
/// Bold spans are resolved first. An italic span may wrap a bold span but
/// never starts or ends inside one, so `**a*b*c**` stays a single bold span
/// with literal asterisks instead of getting an `<em>` nested inside.
///
/// # Examples
///
/// ```
/// use confmark_converter::format_inline;
///
/// assert_eq!(
///     format_inline("**bold** and *italic*"),
///     "<strong>bold</strong> and <em>italic</em>"
/// );
/// ```
#[must_use]
pub fn format_inline(text: &str) -> String {
    render(text, &TAGS)
}

/// Remove emphasis markers, keeping the text inside each span.
///
/// Spans are matched exactly as [`format_inline`] matches them, so any
/// asterisk `format_inline` would leave literal is kept here too.
///
/// ```
/// use confmark_converter::strip_inline;
///
/// assert_eq!(strip_inline("Release **notes** for *v2*"), "Release notes for v2");
/// ```
#[must_use]
pub fn strip_inline(text: &str) -> String {
    render(text, &PLAIN)
}

fn render(text: &str, emphasis: &Emphasis) -> String {
    let (bolded, bold_spans) = render_bold(text, emphasis);

    let mut output = String::with_capacity(bolded.len());
    let mut last = 0;
    let mut pos = 0;
    while let Some(caps) = ITALIC_RE.captures_at(&bolded, pos) {
        let whole = caps.get_match();
        let closing = whole.end() - 1;

        if let Some(span) = bold_spans.iter().find(|s| s.contains(&whole.start())) {
            pos = span.end;
            continue;
        }
        if bold_spans.iter().any(|s| s.contains(&closing)) {
            // Opening `*` can only pair with an asterisk inside the bold span
            pos = whole.start() + 1;
            continue;
        }

        output.push_str(&bolded[last..whole.start()]);
        output.push_str(emphasis.em.0);
        output.push_str(&caps[1]);
        output.push_str(emphasis.em.1);
        last = whole.end();
        pos = whole.end();
    }
    output.push_str(&bolded[last..]);
    output
}

/// Resolve bold spans, returning the text and the byte range of each span in it.
fn render_bold(text: &str, emphasis: &Emphasis) -> (String, Vec<Range<usize>>) {
    let mut output = String::with_capacity(text.len());
    let mut spans = Vec::new();
    let mut last = 0;
    for caps in BOLD_RE.captures_iter(text) {
        let whole = caps.get_match();
        output.push_str(&text[last..whole.start()]);
        let start = output.len();
        output.push_str(emphasis.strong.0);
        output.push_str(&caps[1]);
        output.push_str(emphasis.strong.1);
        spans.push(start..output.len());
        last = whole.end();
    }
    output.push_str(&text[last..]);
    (output, spans)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_bold() {
        assert_eq!(format_inline("a **b** c"), "a <strong>b</strong> c");
    }

    #[test]
    fn test_italic() {
        assert_eq!(format_inline("a *b* c"), "a <em>b</em> c");
    }

    #[test]
    fn test_adjacent_spans_do_not_merge() {
        assert_eq!(
            format_inline("**one** and **two**"),
            "<strong>one</strong> and <strong>two</strong>"
        );
        assert_eq!(format_inline("*one* and *two*"), "<em>one</em> and <em>two</em>");
    }

    #[test]
    fn test_bold_then_italic_on_one_line() {
        assert_eq!(
            format_inline("*x* **y** *z*"),
            "<em>x</em> <strong>y</strong> <em>z</em>"
        );
    }

    #[test]
    fn test_bold_absorbs_inner_single_asterisks() {
        assert_eq!(format_inline("**a*b*c**"), "<strong>a*b*c</strong>");
    }

    #[test]
    fn test_italic_wraps_bold() {
        assert_eq!(
            format_inline("*a **b** c*"),
            "<em>a <strong>b</strong> c</em>"
        );
    }

    #[test]
    fn test_italic_does_not_close_inside_bold() {
        assert_eq!(format_inline("*x **a*b** y"), "*x <strong>a*b</strong> y");
    }

    #[test]
    fn test_literal_strong_tags_do_not_block_italic() {
        assert_eq!(
            format_inline("<strong>*x*</strong>"),
            "<strong><em>x</em></strong>"
        );
    }

    #[test]
    fn test_unbalanced_bold_takes_the_widest_span() {
        // The bold body may contain single asterisks, so the first `**` pairs
        // with the next `**` and the trailing one stays literal.
        assert_eq!(format_inline("**a* b **c**"), "<strong>a* b </strong>c**");
    }

    #[test]
    fn test_unmatched_asterisks_stay_literal() {
        assert_eq!(format_inline("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(format_inline("**open"), "**open");
        assert_eq!(format_inline("***"), "***");
    }

    #[test]
    fn test_empty_span_is_not_formatted() {
        assert_eq!(format_inline("****"), "****");
        assert_eq!(format_inline("**"), "**");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(format_inline("nothing to see"), "nothing to see");
        assert_eq!(format_inline(""), "");
    }

    #[test]
    fn test_strip_inline() {
        assert_eq!(strip_inline("Release **notes**"), "Release notes");
        assert_eq!(strip_inline("*a **b** c*"), "a b c");
        assert_eq!(strip_inline("**a*b*c**"), "a*b*c");
        assert_eq!(strip_inline("2 * 3"), "2 * 3");
    }
}
