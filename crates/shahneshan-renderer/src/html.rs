//! HTML rendering of the node tree.
//!
//! The renderer walks content in order, emitting child nodes through the
//! mapping below and text fragments verbatim (they were inline-formatted at
//! scan time). Attribute values are always escaped.

use std::fmt::Write;

use crate::inline::strip_inline_markdown;
use crate::node::{Alignment, Content, Node};
use crate::plugin::Plugins;
use crate::util::{dir_for, escape_html, slugify, strip_tags};

/// Renders nodes to HTML and applies the after-render hooks.
pub struct HtmlRenderer<'p> {
    plugins: &'p Plugins,
}

impl<'p> HtmlRenderer<'p> {
    #[must_use]
    pub fn new(plugins: &'p Plugins) -> Self {
        Self { plugins }
    }

    /// Render a node sequence into a complete HTML fragment.
    #[must_use]
    pub fn render(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            write_node(node, &mut out);
        }
        self.plugins.apply_after_render(out)
    }
}

/// Render one node without running any hooks.
#[must_use]
pub fn render_node(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Anchor id for a heading.
///
/// Uses the markup-free `raw` text when the scanner recorded it, otherwise
/// the rendered heading content with tags removed.
pub(crate) fn heading_id(raw: Option<&str>, rendered: &str) -> String {
    match raw {
        Some(raw) => slugify(raw),
        None => slugify(&strip_inline_markdown(&strip_tags(rendered))),
    }
}

pub(crate) fn render_content(content: &[Content]) -> String {
    let mut out = String::new();
    write_content(content, &mut out);
    out
}

fn write_content(content: &[Content], out: &mut String) {
    for item in content {
        match item {
            Content::Node(node) => write_node(node, out),
            Content::Text(html) => out.push_str(html),
        }
    }
}

/// Write `<tag attrs>content</tag>`.
fn wrap(out: &mut String, open: &str, content: &[Content], close: &str) {
    out.push_str(open);
    write_content(content, out);
    out.push_str(close);
}

fn align_attr(align: Option<Alignment>) -> String {
    align.map_or_else(String::new, |a| {
        format!(r#" align="{}""#, escape_html(a.as_str()))
    })
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Heading {
            level,
            raw,
            content,
        } => {
            let level = (*level).clamp(1, 6);
            let inner = render_content(content);
            let id = heading_id(raw.as_deref(), &inner);
            let _ = write!(
                out,
                r#"<h{level} id="{}" dir="auto">{inner}</h{level}>"#,
                escape_html(&id)
            );
        }
        Node::Paragraph { content } => wrap(out, r#"<p dir="auto">"#, content, "</p>"),
        Node::Blockquote { content } => wrap(out, "<blockquote>", content, "</blockquote>"),
        Node::List {
            kind,
            is_rtl,
            content,
        } => {
            let tag = kind.tag();
            let open = format!(r#"<{tag} dir="{}">"#, dir_for(*is_rtl));
            wrap(out, &open, content, &format!("</{tag}>"));
        }
        Node::ListItem { is_rtl, content } => {
            let open = format!(r#"<li dir="{}">"#, dir_for(*is_rtl));
            wrap(out, &open, content, "</li>");
        }
        Node::TaskItem {
            checked,
            is_rtl,
            content,
        } => {
            let checked = if *checked { "checked " } else { "" };
            let open = format!(
                r#"<li class="task" dir="{}"><input type="checkbox" {checked}disabled> "#,
                dir_for(*is_rtl)
            );
            wrap(out, &open, content, "</li>");
        }
        Node::CodeBlock { lang, lines } => {
            if lang.is_empty() {
                out.push_str("<pre><code>");
            } else {
                let _ = write!(out, r#"<pre><code class="language-{}">"#, escape_html(lang));
            }
            out.push_str(&escape_html(&lines.join("\n")));
            out.push_str("</code></pre>");
        }
        Node::CustomBlock { kind, content } => {
            let open = format!(r#"<div class="persian {}">"#, escape_html(kind.class_name()));
            wrap(out, &open, content, "</div>");
        }
        Node::PoetRow { content } => write_content(content, out),
        Node::PoetCell { content } => wrap(out, r#"<div class="stanza">"#, content, "</div>"),
        Node::Alert { kind, content } => {
            let open = format!(
                r#"<div class="alert {}" dir="auto"><div class="alert-title">{}</div><div class="alert-content">"#,
                kind.name(),
                kind.title()
            );
            wrap(out, &open, content, "</div></div>");
        }
        Node::Nested { .. } => {}
        Node::ThematicBreak => out.push_str("<hr />"),
        Node::Table { content } => write_table(content, out),
        Node::TableRow { content } => wrap(out, "<tr>", content, "</tr>"),
        Node::TableHeaderCell { align, content } => {
            let open = format!("<th{}>", align_attr(*align));
            wrap(out, &open, content, "</th>");
        }
        Node::TableCell { align, content } => {
            let open = format!("<td{}>", align_attr(*align));
            wrap(out, &open, content, "</td>");
        }
        Node::Image { src, alt } => {
            let _ = write!(
                out,
                r#"<img src="{}" alt="{}">"#,
                escape_html(src),
                escape_html(alt)
            );
        }
        Node::Html { html } => out.push_str(html),
        Node::Footnotes { content } => wrap(
            out,
            r#"<section class="footnotes" dir="auto"><h2>Footnotes</h2><ol>"#,
            content,
            "</ol></section>",
        ),
        Node::Footnote { reference, content } => {
            let reference = escape_html(reference);
            let _ = write!(out, r#"<li id="footnote-{reference}">"#);
            write_content(content, out);
            let _ = write!(out, r##" <a href="#footnote-ref-{reference}">↩</a></li>"##);
        }
    }
}

/// Header row (the leading row of header cells) goes in `<thead>`, the rest in `<tbody>`.
fn write_table(rows: &[Content], out: &mut String) {
    let is_header_row = |item: &Content| match item {
        Content::Node(row) => row
            .children()
            .any(|cell| matches!(cell, Node::TableHeaderCell { .. })),
        Content::Text(_) => false,
    };
    let split = usize::from(rows.first().is_some_and(is_header_row));
    let (head, body) = rows.split_at(split);

    out.push_str("<table>");
    if !head.is_empty() {
        wrap(out, "<thead>", head, "</thead>");
    }
    if !body.is_empty() {
        wrap(out, "<tbody>", body, "</tbody>");
    }
    out.push_str("</table>");
}
