//! Line classification.
//!
//! Each source line is matched against the block patterns once, in dispatch
//! priority order. State-dependent handling (open fences, custom blocks,
//! lists) is left to the scanner.

use std::sync::LazyLock;

use regex::Regex;

use crate::node::ListKind;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6}) (.*)$").unwrap());

static FOOTNOTE_DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\^(\p{N}+)\]:\s+(.*)$").unwrap());

static TASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-+*] \[([ xX])\] (.*)$").unwrap());

/// Image alone on its line.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*!\[(.*?)\]\((.*?)\)\s*$").unwrap());

static HTML_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*<[^>]+>").unwrap());

pub(crate) static TABLE_ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|\s*(.+)\s*\|\s*$").unwrap());

pub(crate) static ALIGNMENT_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|\s*[:\-]+(?:\s*\|\s*[:\-]+)*\s*\|\s*$").unwrap()
});

static UNORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s(.*)$").unwrap());

static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\p{N}+\.\s(.*)$").unwrap());

/// Block construct a line opens or continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// ```` ``` ```` with an optional info string.
    Fence { info: &'a str },
    /// `...keyword` opening or closing a custom block.
    CustomDelimiter { keyword: &'a str },
    /// `> text`
    Blockquote { text: &'a str },
    Heading { level: u8, text: &'a str },
    ThematicBreak,
    FootnoteDefinition { reference: &'a str, text: &'a str },
    TaskItem { checked: bool, text: &'a str },
    Image { alt: &'a str, src: &'a str },
    Html,
    TableRow,
    ListItem {
        kind: ListKind,
        indent: usize,
        text: &'a str,
    },
    Blank,
    Text,
}

impl LineKind<'_> {
    /// Whether the line keeps open lists open. Footnote definitions produce
    /// no node, so they do not interrupt a list either.
    pub fn continues_list(&self) -> bool {
        matches!(
            self,
            Self::TaskItem { .. }
                | Self::ListItem { .. }
                | Self::FootnoteDefinition { .. }
                | Self::Blank
        )
    }
}

/// Classify a line. The first matching construct wins.
pub(crate) fn classify(line: &str) -> LineKind<'_> {
    if let Some(info) = line.trim_start().strip_prefix("```") {
        return LineKind::Fence { info: info.trim() };
    }
    if let Some(keyword) = line.strip_prefix("...") {
        return LineKind::CustomDelimiter {
            keyword: keyword.trim(),
        };
    }
    if let Some(text) = line.strip_prefix("> ") {
        return LineKind::Blockquote { text: text.trim() };
    }
    if let Some(caps) = HEADING_RE.captures(line) {
        let hashes = caps.get(1).map_or(1, |m| m.len());
        return LineKind::Heading {
            level: u8::try_from(hashes).unwrap_or(6),
            text: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if is_thematic_break(line) {
        return LineKind::ThematicBreak;
    }
    if let Some(caps) = FOOTNOTE_DEF_RE.captures(line) {
        return LineKind::FootnoteDefinition {
            reference: caps.get(1).map_or("", |m| m.as_str()),
            text: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = TASK_RE.captures(line) {
        return LineKind::TaskItem {
            checked: caps.get(1).is_some_and(|m| m.as_str() != " "),
            text: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = IMAGE_RE.captures(line) {
        return LineKind::Image {
            alt: caps.get(1).map_or("", |m| m.as_str()),
            src: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if HTML_RE.is_match(line) {
        return LineKind::Html;
    }
    if TABLE_ROW_RE.is_match(line) {
        return LineKind::TableRow;
    }
    if let Some(kind) = list_item(line) {
        return kind;
    }
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    LineKind::Text
}

/// Three or more of the same `-`, `*` or `_`, and nothing else.
fn is_thematic_break(line: &str) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && trimmed.len() >= 3 && chars.all(|c| c == first)
}

fn list_item(line: &str) -> Option<LineKind<'_>> {
    let (kind, caps) = if let Some(caps) = UNORDERED_RE.captures(line) {
        (ListKind::Unordered, caps)
    } else {
        (ListKind::Ordered, ORDERED_RE.captures(line)?)
    };
    Some(LineKind::ListItem {
        kind,
        indent: indent_width(line),
        text: caps.get(1).map_or("", |m| m.as_str()),
    })
}

/// Number of leading whitespace characters.
pub(crate) fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
