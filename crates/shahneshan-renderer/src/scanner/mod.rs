//! Block scanner: turns markdown lines into a node tree.
//!
//! Each line is classified once and dispatched in priority order: fences,
//! custom blocks, blockquotes, headings, thematic breaks, footnote
//! definitions, task items, images, raw HTML, tables, list items and finally
//! paragraphs. Blockquote lines, list and task item text, table cells and
//! alert lines are scanned again as documents of their own, bounded by a
//! depth ceiling.
//!
//! Footnote definitions are collected across the whole document, including
//! nested scans, and emitted as one trailing footnotes node.

mod custom;
mod line;
mod state;
mod table;

use crate::error::RenderError;
use crate::inline::{format_inline, strip_inline_markdown};
use crate::node::{Content, CustomKind, ListKind, Node};
use crate::plugin::Plugins;
use crate::util::is_rtl;

use line::{LineKind, classify};
use state::{OpenCustom, ScannerState};

/// Document scanner.
///
/// Holds state shared by every nested scan of one document: the recursion
/// depth and the footnote definitions.
pub(crate) struct Scanner<'p> {
    plugins: &'p Plugins,
    max_depth: usize,
    depth: usize,
    /// Reference and raw text, in first-definition order.
    footnotes: Vec<(String, String)>,
}

impl<'p> Scanner<'p> {
    pub fn new(plugins: &'p Plugins, max_depth: usize) -> Self {
        Self {
            plugins,
            max_depth,
            depth: 0,
            footnotes: Vec::new(),
        }
    }

    /// Scan a whole document.
    ///
    /// Runs the before-parse hooks on the source, the node transform hooks on
    /// every top-level node, and appends the footnotes node when any footnote
    /// was defined.
    pub fn scan(mut self, text: &str) -> Result<Vec<Node>, RenderError> {
        let text = self.plugins.apply_before_parse(text.to_owned());
        let nodes = self.scan_blocks(&text)?;

        let mut nodes: Vec<Node> = nodes
            .into_iter()
            .map(|node| self.plugins.apply_transform_node(node))
            .collect();
        if let Some(footnotes) = self.footnotes_node() {
            nodes.push(footnotes);
        }
        Ok(nodes)
    }

    fn scan_blocks(&mut self, text: &str) -> Result<Vec<Node>, RenderError> {
        if self.depth >= self.max_depth {
            return Err(RenderError::RecursionLimitExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = self.scan_lines(text);
        self.depth -= 1;
        result
    }

    fn scan_content(&mut self, text: &str) -> Result<Vec<Content>, RenderError> {
        let nodes = self.scan_blocks(text)?;
        Ok(nodes.into_iter().map(Content::Node).collect())
    }

    fn scan_lines(&mut self, text: &str) -> Result<Vec<Node>, RenderError> {
        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        let mut state = ScannerState::default();

        let mut i = 0;
        while i < lines.len() {
            i += self.scan_line(&mut state, &lines, i)?;
        }

        Ok(state.nodes)
    }

    /// Handle the line at `lines[i]`, returning how many lines were consumed.
    fn scan_line(
        &mut self,
        state: &mut ScannerState,
        lines: &[&str],
        i: usize,
    ) -> Result<usize, RenderError> {
        let line = lines[i];
        let kind = classify(line);

        if let Some(index) = state.fence {
            if matches!(kind, LineKind::Fence { .. }) {
                state.fence = None;
            } else if let Some(Node::CodeBlock { lines: code, .. }) = state.nodes.get_mut(index) {
                code.push(line.to_owned());
            }
            return Ok(1);
        }

        if state.custom.is_some() && !matches!(kind, LineKind::Fence { .. }) {
            if matches!(kind, LineKind::CustomDelimiter { .. }) {
                state.custom = None;
            } else {
                self.custom_line(state, line)?;
            }
            return Ok(1);
        }

        if !kind.continues_list() {
            state.close_lists();
        }
        if !matches!(kind, LineKind::Blockquote { .. }) {
            state.blockquote = None;
        }

        match kind {
            LineKind::Fence { info } => {
                let index = state.push(Node::CodeBlock {
                    lang: info.to_owned(),
                    lines: Vec::new(),
                });
                state.fence = Some(index);
            }
            LineKind::CustomDelimiter { keyword } => {
                let kind = custom::resolve(keyword);
                let index = state.push(Node::CustomBlock {
                    kind: kind.clone(),
                    content: Vec::new(),
                });
                state.custom = Some(OpenCustom { index, kind });
            }
            LineKind::Blockquote { text } => {
                let children = self.scan_content(text)?;
                let index = match state.blockquote {
                    Some(index) => index,
                    None => {
                        let index = state.push(Node::Blockquote {
                            content: Vec::new(),
                        });
                        state.blockquote = Some(index);
                        index
                    }
                };
                if let Some(content) = state.nodes.get_mut(index).and_then(Node::content_mut) {
                    content.extend(children);
                }
            }
            LineKind::Heading { level, text } => {
                state.push(Node::Heading {
                    level,
                    raw: Some(strip_inline_markdown(text)),
                    content: vec![Content::Text(format_inline(text))],
                });
            }
            LineKind::ThematicBreak => {
                state.push(Node::ThematicBreak);
            }
            LineKind::FootnoteDefinition { reference, text } => {
                self.define_footnote(reference, text);
            }
            LineKind::TaskItem { checked, text } => {
                let is_rtl = is_rtl(line);
                let item = Node::TaskItem {
                    checked,
                    is_rtl,
                    content: self.scan_content(text)?,
                };
                if state.top_list_kind() != Some(ListKind::Unordered) {
                    state.open_top_level_list(ListKind::Unordered, is_rtl);
                }
                state.push_list_item(item);
            }
            LineKind::Image { alt, src } => {
                state.push(Node::Image {
                    src: src.to_owned(),
                    alt: alt.to_owned(),
                });
            }
            LineKind::Html => {
                state.push(Node::Html {
                    html: line.to_owned(),
                });
            }
            LineKind::TableRow => {
                let count = table::row_count(lines, i);
                let node = self.table(&lines[i..i + count])?;
                state.push(node);
                return Ok(count);
            }
            LineKind::ListItem { kind, indent, text } => {
                self.list_item(state, kind, indent, text, is_rtl(line))?;
            }
            LineKind::Blank => {}
            LineKind::Text => {
                state.push(Node::paragraph(format_inline(line.trim())));
            }
        }

        Ok(1)
    }

    fn list_item(
        &mut self,
        state: &mut ScannerState,
        kind: ListKind,
        indent: usize,
        text: &str,
        is_rtl: bool,
    ) -> Result<(), RenderError> {
        let item = Node::ListItem {
            is_rtl,
            content: self.scan_content(text)?,
        };
        let indent = isize::try_from(indent).unwrap_or(isize::MAX);

        if indent > state.indent {
            state.open_nested_list(kind, is_rtl);
        } else if indent < state.indent {
            state.dedent(indent);
        }
        if state.top_list_kind() != Some(kind) {
            state.open_top_level_list(kind, is_rtl);
        }
        state.push_list_item(item);
        state.indent = indent;
        Ok(())
    }

    fn table(&mut self, lines: &[&str]) -> Result<Node, RenderError> {
        let parsed = table::parse_rows(lines);
        let has_header = parsed.has_header();

        let mut rows = Vec::with_capacity(parsed.rows.len());
        for (row_index, cells) in parsed.rows.iter().enumerate() {
            let mut row = Vec::with_capacity(cells.len());
            for (column, text) in cells.iter().enumerate() {
                let align = parsed.alignments.get(column).copied();
                let content = self.scan_content(text)?;
                let cell = if has_header && row_index == 0 {
                    Node::TableHeaderCell { align, content }
                } else {
                    Node::TableCell { align, content }
                };
                row.push(Content::Node(cell));
            }
            rows.push(Content::Node(Node::TableRow { content: row }));
        }

        Ok(Node::Table { content: rows })
    }

    /// Append a line to the open custom block. Each alert line is scanned as
    /// a document of its own and becomes one alert child.
    fn custom_line(&mut self, state: &mut ScannerState, line: &str) -> Result<(), RenderError> {
        let Some(open) = state.custom.as_ref() else {
            return Ok(());
        };
        let index = open.index;
        let child = match &open.kind {
            CustomKind::Poetry => {
                let cells = custom::poetry_cells(line)
                    .map(|cell| {
                        Content::Node(Node::PoetCell {
                            content: vec![Content::Text(format_inline(cell))],
                        })
                    })
                    .collect();
                Node::PoetRow { content: cells }
            }
            CustomKind::Alert(kind) => Node::Alert {
                kind: *kind,
                content: self.scan_content(line)?,
            },
            CustomKind::Other(keyword) => Node::Nested {
                kind: keyword.clone(),
                line: line.to_owned(),
            },
        };
        state.push_child(index, child);
        Ok(())
    }

    fn define_footnote(&mut self, reference: &str, text: &str) {
        match self.footnotes.iter_mut().find(|(r, _)| r == reference) {
            Some((_, existing)) => text.clone_into(existing),
            None => self
                .footnotes
                .push((reference.to_owned(), text.to_owned())),
        }
    }

    fn footnotes_node(&self) -> Option<Node> {
        if self.footnotes.is_empty() {
            return None;
        }
        let content = self
            .footnotes
            .iter()
            .map(|(reference, text)| {
                Content::Node(Node::Footnote {
                    reference: reference.clone(),
                    content: vec![Content::Text(format_inline(text))],
                })
            })
            .collect();
        Some(Node::Footnotes { content })
    }
}
