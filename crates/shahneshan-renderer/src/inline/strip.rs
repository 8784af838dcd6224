//! Markup removal for heading anchors.

use std::sync::LazyLock;

use regex::Regex;

/// Ordered substitutions reducing inline markdown to plain text.
static STRIP_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Backslash-escaped punctuation
        (r"\\([\\`*_{}\[\]()#+\-.!>])", "${1}"),
        (r"!\[.*?\]\(.*?\)", ""),
        (r"\[([^\]]+?)\]\(.*?\)", "${1}"),
        (r"\*\*(.+?)\*\*", "${1}"),
        (r"__(.+?)__", "${1}"),
        (r"\*(.+?)\*", "${1}"),
        (r"_(.+?)_", "${1}"),
        (r"~~(.+?)~~", "${1}"),
        (r"==(.+?)==", "${1}"),
        (r"`([^`]+?)`", "${1}"),
        (r"\[\^\p{N}+\]", ""),
        (r"(?m)^\s*>+\s?", ""),
        (r"[*_~`>#\[\]()\-!]", ""),
        (r"\s{2,}", " "),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Strip inline markdown from heading text, leaving the words a reader sees.
///
/// Images disappear, links keep their label, emphasis and code delimiters are
/// dropped, footnote references and quote markers are removed, and remaining
/// markup punctuation is deleted before whitespace is collapsed.
///
/// # Examples
///
/// ```
/// use shahneshan_renderer::{slugify, strip_inline_markdown};
///
/// let text = strip_inline_markdown("**Install** the [CLI](https://x.io)[^1]");
/// assert_eq!(text, "Install the CLI");
/// assert_eq!(slugify(&text), "install-the-cli");
/// ```
#[must_use]
pub fn strip_inline_markdown(text: &str) -> String {
    let stripped = STRIP_RULES
        .iter()
        .fold(text.to_owned(), |s, (re, replacement)| {
            re.replace_all(&s, *replacement).into_owned()
        });
    stripped.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_strip_emphasis() {
        assert_eq!(strip_inline_markdown("**a** __b__ *c* _d_"), "a b c d");
        assert_eq!(strip_inline_markdown("~~old~~ ==new=="), "old new");
    }

    #[test]
    fn test_strip_code_and_links() {
        assert_eq!(strip_inline_markdown("Use `cargo`"), "Use cargo");
        assert_eq!(strip_inline_markdown("[راهنما](guide.md)"), "راهنما");
        assert_eq!(strip_inline_markdown("Logo ![x](logo.png) here"), "Logo here");
    }

    #[test]
    fn test_strip_footnotes_and_quotes() {
        assert_eq!(strip_inline_markdown("Title[^12]"), "Title");
        assert_eq!(strip_inline_markdown("> quoted"), "quoted");
    }

    #[test]
    fn test_strip_leftover_punctuation() {
        assert_eq!(strip_inline_markdown("# C#  - notes!"), "C notes");
        assert_eq!(strip_inline_markdown(r"a \* b"), "a b");
    }
}
