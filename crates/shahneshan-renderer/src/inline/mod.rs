//! Inline formatting within a single line of text.
//!
//! [`format_inline`] walks the line once with a [`Cursor`], trying the rules
//! below at every position in priority order. The first rule that matches
//! consumes its input; anything no rule claims is copied through unchanged.
//!
//! | Priority | Syntax | Output |
//! |----------|--------|--------|
//! | 1 | `` `code` `` | `<code>` with escaped content, no further formatting |
//! | 2 | `**x**` | `<strong>` |
//! | 3 | `*x*` | `<em>` |
//! | 4 | `~~x~~` | `<del>` |
//! | 5 | `==x==` | `<mark>` |
//! | 6 | `~x~` | `<sub>` |
//! | 7 | `^x^` | `<sup>` |
//! | 8 | `![alt](src)` | `<img>` |
//! | 9 | `[label](href)` | `<a>` |
//! | 10 | `[^1]` | footnote reference |
//! | 11 | `https://...` | autolink opening in a new tab |
//!
//! Plain text is not escaped, so inline HTML passes through.

mod cursor;
mod strip;

use std::fmt::Write;

use cursor::Cursor;
pub use strip::strip_inline_markdown;

use crate::util::escape_html;

/// Apply inline formatting to a line of markdown.
///
/// Never fails: delimiters without a matching closer are emitted literally.
///
/// # Examples
///
/// ```
/// use shahneshan_renderer::format_inline;
///
/// assert_eq!(format_inline("**bold** and `**code**`"), "<strong>bold</strong> and <code>**code**</code>");
/// ```
#[must_use]
pub fn format_inline(text: &str) -> String {
    Formatter { autolink: true }.format(text)
}

#[derive(Clone, Copy)]
struct Formatter {
    /// Disabled inside link labels so a URL label does not nest another anchor.
    autolink: bool,
}

impl Formatter {
    fn format(self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cur = Cursor::new(text);

        while let Some(c) = cur.peek() {
            let consumed = match c {
                '`' => code_span(&mut cur, &mut out),
                '*' => self.emphasis(&mut cur, &mut out, ("**", "strong"), ("*", "em")),
                '~' => self.emphasis(&mut cur, &mut out, ("~~", "del"), ("~", "sub")),
                '=' => cur.starts_with("==") && self.delimited(&mut cur, &mut out, "==", "mark"),
                '^' => self.delimited(&mut cur, &mut out, "^", "sup"),
                '!' => image(&mut cur, &mut out),
                '[' => self.link(&mut cur, &mut out) || footnote_ref(&mut cur, &mut out),
                'h' => self.autolink && autolink(&mut cur, &mut out),
                _ => false,
            };
            if !consumed {
                out.push(c);
                cur.bump();
            }
        }

        out
    }

    /// Try the doubled delimiter first, then the single one.
    ///
    /// An unmatched doubled delimiter is emitted literally as a whole so its
    /// second character cannot open the single-character rule.
    fn emphasis(
        self,
        cur: &mut Cursor<'_>,
        out: &mut String,
        double: (&str, &str),
        single: (&str, &str),
    ) -> bool {
        if cur.starts_with(double.0) {
            if !self.delimited(cur, out, double.0, double.1) {
                out.push_str(double.0);
                cur.bump_n(double.0.len());
            }
            return true;
        }
        self.delimited(cur, out, single.0, single.1)
    }

    /// Wrap the text between `delim` and its closer in `<tag>`, formatting it recursively.
    fn delimited(self, cur: &mut Cursor<'_>, out: &mut String, delim: &str, tag: &str) -> bool {
        let start = cur.i + delim.len();
        let Some(end) = find_closer(cur.s, start, delim) else {
            return false;
        };
        let Some(inner) = cur.s.get(start..end) else {
            return false;
        };

        let _ = write!(out, "<{tag}>{}</{tag}>", self.format(inner));
        cur.i = end + delim.len();
        true
    }

    fn link(self, cur: &mut Cursor<'_>, out: &mut String) -> bool {
        let Some(parts) = split_link(cur.rest()) else {
            return false;
        };
        let label = Self { autolink: false }.format(parts.label);
        let _ = write!(out, r#"<a href="{}">{label}</a>"#, escape_html(parts.target));
        cur.bump_n(parts.len);
        true
    }
}

/// Length of the code span at the start of `s`, including both backticks.
fn code_span_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('`')?;
    let close = body.find('`')?;
    (close > 0).then_some(close + 2)
}

fn code_span(cur: &mut Cursor<'_>, out: &mut String) -> bool {
    let rest = cur.rest();
    let Some(len) = code_span_len(rest) else {
        return false;
    };
    let Some(inner) = rest.get(1..len - 1) else {
        return false;
    };
    let _ = write!(out, "<code>{}</code>", escape_html(inner));
    cur.bump_n(len);
    true
}

/// Find the byte offset of the closing `delim` at or after `from`.
///
/// Code spans are skipped. A single-character delimiter only closes on a run
/// of exactly one; a doubled delimiter closes at the end of a longer run so
/// `***x***` nests emphasis inside strong. The content must be non-empty.
fn find_closer(s: &str, from: usize, delim: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let marker = *delim.as_bytes().first()?;
    let mut j = from;

    while j < bytes.len() {
        let b = bytes[j];
        if b == b'`' {
            j += s.get(j..).and_then(code_span_len).unwrap_or(1);
            continue;
        }
        if b != marker {
            j += 1;
            continue;
        }

        let run = bytes[j..].iter().take_while(|&&x| x == marker).count();
        if delim.len() == 1 {
            if run == 1 && j > from {
                return Some(j);
            }
        } else if run >= delim.len() {
            let close = j + run - delim.len();
            if close > from {
                return Some(close);
            }
        }
        j += run;
    }

    None
}

struct LinkParts<'a> {
    label: &'a str,
    target: &'a str,
    /// Bytes consumed from the opening `[` to the closing `)`.
    len: usize,
}

/// Split `[label](target)` at the start of `s`.
///
/// The label ends at the first `]` and may not contain `[`; the target ends
/// at the first `)`.
fn split_link(s: &str) -> Option<LinkParts<'_>> {
    let body = s.strip_prefix('[')?;
    let label_end = body.find(']')?;
    let label = &body[..label_end];
    if label.contains('[') {
        return None;
    }
    let after = body[label_end + 1..].strip_prefix('(')?;
    let target_end = after.find(')')?;

    Some(LinkParts {
        label,
        target: &after[..target_end],
        len: 1 + label_end + 2 + target_end + 1,
    })
}

fn image(cur: &mut Cursor<'_>, out: &mut String) -> bool {
    let Some(parts) = cur.rest().strip_prefix('!').and_then(split_link) else {
        return false;
    };
    let _ = write!(
        out,
        r#"<img src="{}" alt="{}">"#,
        escape_html(parts.target),
        escape_html(parts.label)
    );
    cur.bump_n(1 + parts.len);
    true
}

/// `[^N]` where `N` is one or more Unicode digits.
fn footnote_ref(cur: &mut Cursor<'_>, out: &mut String) -> bool {
    let Some(body) = cur.rest().strip_prefix("[^") else {
        return false;
    };
    let Some(end) = body.find(']') else {
        return false;
    };
    let reference = &body[..end];
    if reference.is_empty() || !reference.chars().all(char::is_numeric) {
        return false;
    }

    let reference = escape_html(reference);
    let _ = write!(
        out,
        r##"<sup id="footnote-ref-{reference}"><a href="#footnote-{reference}">[{reference}]</a></sup>"##
    );
    cur.bump_n(2 + end + 1);
    true
}

/// Bare `http://` or `https://` URL that is not the value of an attribute.
fn autolink(cur: &mut Cursor<'_>, out: &mut String) -> bool {
    if matches!(cur.prev(), Some('"' | '\'' | '=')) {
        return false;
    }
    let rest = cur.rest();
    let scheme_len = if rest.starts_with("https://") {
        "https://".len()
    } else if rest.starts_with("http://") {
        "http://".len()
    } else {
        return false;
    };

    let len = rest
        .find(|c: char| c.is_whitespace() || matches!(c, '`' | '<' | '>' | '"'))
        .unwrap_or(rest.len());
    if len <= scheme_len {
        return false;
    }

    let url = escape_html(&rest[..len]);
    let _ = write!(out, r#"<a href="{url}" target="_blank">{url}</a>"#);
    cur.bump_n(len);
    true
}
