//! Pipe table helpers.

use crate::node::Alignment;

use super::line::{ALIGNMENT_ROW_RE, TABLE_ROW_RE};

/// Rows of one table, with the alignment row already removed.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct TableRows<'a> {
    /// Per-column alignment. Empty when the table has no alignment row.
    pub alignments: Vec<Alignment>,
    /// Cell texts per row, trimmed.
    pub rows: Vec<Vec<&'a str>>,
}

impl TableRows<'_> {
    /// The first row is a header only when an alignment row follows it.
    pub fn has_header(&self) -> bool {
        !self.alignments.is_empty()
    }
}

/// Number of consecutive table rows starting at `lines[start]`.
pub(crate) fn row_count(lines: &[&str], start: usize) -> usize {
    lines
        .iter()
        .skip(start)
        .take_while(|line| TABLE_ROW_RE.is_match(line))
        .count()
}

/// Split table lines into cells and extract the alignment row.
pub(crate) fn parse_rows<'a>(lines: &[&'a str]) -> TableRows<'a> {
    let mut lines = lines.to_vec();
    let mut alignments = Vec::new();

    if lines.len() >= 2 && ALIGNMENT_ROW_RE.is_match(lines[1].trim()) {
        alignments = parse_alignments(lines.remove(1));
    }

    let rows = lines.into_iter().map(split_cells).collect();
    TableRows { alignments, rows }
}

/// `:-:` centers, `-:` right-aligns, anything else left-aligns.
fn parse_alignments(spec: &str) -> Vec<Alignment> {
    let spec = spec.trim();
    let inner = spec
        .strip_prefix('|')
        .and_then(|s| s.strip_suffix('|'))
        .unwrap_or(spec);

    inner
        .split('|')
        .map(str::trim)
        .map(|part| match (part.starts_with(':'), part.ends_with(':')) {
            (true, true) => Alignment::Center,
            (false, true) => Alignment::Right,
            _ => Alignment::Left,
        })
        .collect()
}

fn split_cells(line: &str) -> Vec<&str> {
    let Some(inner) = TABLE_ROW_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return Vec::new();
    };
    inner.split('|').map(str::trim).collect()
}
