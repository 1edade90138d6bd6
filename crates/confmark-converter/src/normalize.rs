//! Typographic character normalization.
//!
//! Confluence storage bodies are XHTML, so a bare `&` would break the page.
//! Smart punctuation pasted from word processors is flattened to ASCII at the
//! same time.

/// Substitutions applied by [`normalize`], in order.
const SUBSTITUTIONS: [(char, &str); 7] = [
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('&', "and"),
];

/// Replace dashes, smart quotes and ampersands with their plain equivalents.
///
/// None of the replacement strings contain a character that another rule
/// matches, so the result is stable under repeated application.
///
/// # Examples
///
/// ```
/// use confmark_converter::normalize;
///
/// assert_eq!(normalize("Q&A \u{2014} \u{201C}hi\u{201D}"), "QandA - \"hi\"");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match SUBSTITUTIONS.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => out.push_str(to),
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dashes() {
        assert_eq!(normalize("2019\u{2013}2020 \u{2014} done"), "2019-2020 - done");
    }

    #[test]
    fn test_normalize_double_quotes() {
        assert_eq!(normalize("\u{201C}quoted\u{201D}"), "\"quoted\"");
    }

    #[test]
    fn test_normalize_single_quotes() {
        assert_eq!(normalize("it\u{2019}s \u{2018}x\u{2019}"), "it's 'x'");
    }

    #[test]
    fn test_normalize_ampersand() {
        assert_eq!(normalize("R&D & QA"), "RandD and QA");
    }

    #[test]
    fn test_normalize_leaves_other_characters() {
        let text = "plain ASCII, émoji 🚀, minus \u{2212}, prime \u{2032}";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "",
            "a & b",
            "\u{201C}R&D\u{201D} \u{2013} \u{2018}ok\u{2019}",
            "&&&\u{2014}\u{2014}",
            "nothing special",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }
}
