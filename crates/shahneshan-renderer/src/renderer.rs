//! Scan-and-render pipeline with plugin hooks.

use crate::error::RenderError;
use crate::html::{HtmlRenderer, heading_id, render_content};
use crate::node::Node;
use crate::plugin::{Plugin, Plugins};
use crate::scanner::Scanner;
use crate::util::strip_tags;

/// Default ceiling for nested scans (blockquotes, list items, table cells, alerts).
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text without markup.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML, after the after-render hooks.
    pub html: String,
    /// Every heading in document order, including nested ones.
    pub toc: Vec<TocEntry>,
}

/// Markdown to HTML pipeline.
///
/// Owns the plugin list and the recursion ceiling. Rendering takes `&self`,
/// so one renderer can serve documents from several threads.
///
/// # Example
///
/// ```
/// use shahneshan_renderer::MarkdownRenderer;
///
/// let result = MarkdownRenderer::new()
///     .render_markdown("# سلام\n\n- یک\n- دو")
///     .unwrap();
/// assert!(result.html.starts_with(r#"<h1 id="سلام" dir="auto">سلام</h1>"#));
/// assert!(result.html.contains(r#"<ul dir="rtl">"#));
/// assert_eq!(result.toc[0].id, "سلام");
/// ```
#[derive(Debug)]
pub struct MarkdownRenderer {
    plugins: Plugins,
    max_depth: usize,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a renderer with no plugins and the default depth ceiling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plugins: Plugins::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Register a plugin. Hooks run in registration order.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Set the maximum nesting depth of recursive scans.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub fn plugins(&self) -> &Plugins {
        &self.plugins
    }

    /// Scan markdown into nodes, running before-parse and node transform hooks.
    pub fn parse(&self, markdown: &str) -> Result<Vec<Node>, RenderError> {
        Scanner::new(&self.plugins, self.max_depth).scan(markdown)
    }

    /// Render nodes to HTML, running after-render hooks.
    #[must_use]
    pub fn render_nodes(&self, nodes: &[Node]) -> String {
        HtmlRenderer::new(&self.plugins).render(nodes)
    }

    /// Run the whole pipeline.
    pub fn render_markdown(&self, markdown: &str) -> Result<RenderResult, RenderError> {
        let nodes = self.parse(markdown)?;
        let mut toc = Vec::new();
        collect_toc(&nodes, &mut toc);
        let html = self.render_nodes(&nodes);
        Ok(RenderResult { html, toc })
    }
}

fn collect_toc<'n>(nodes: impl IntoIterator<Item = &'n Node>, toc: &mut Vec<TocEntry>) {
    for node in nodes {
        if let Node::Heading {
            level,
            raw,
            content,
        } = node
        {
            let rendered = render_content(content);
            let title = raw.clone().unwrap_or_else(|| strip_tags(&rendered));
            toc.push(TocEntry {
                level: *level,
                id: heading_id(raw.as_deref(), &rendered),
                title,
            });
        }
        collect_toc(node.children(), toc);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(markdown: &str) -> String {
        MarkdownRenderer::new().render_markdown(markdown).unwrap().html
    }

    #[test]
    fn test_nested_list_renders_inside_item() {
        assert_eq!(
            render("- a\n  - b"),
            r#"<ul dir="ltr"><li dir="ltr"><p dir="auto">a</p><ul dir="ltr"><li dir="ltr"><p dir="auto">b</p></li></ul></li></ul>"#
        );
    }

    #[test]
    fn test_footnote_definition_inside_list() {
        let html = render("- a\n[^1]: note\n- b");
        assert_eq!(html.matches("<ul").count(), 1);
        assert!(html.ends_with("</section>"));
    }

    #[test]
    fn test_aligned_table() {
        let html = render("|A|B|\n|:--|--:|\n|1|2|");
        assert_eq!(
            html,
            concat!(
                "<table><thead><tr>",
                r#"<th align="left"><p dir="auto">A</p></th>"#,
                r#"<th align="right"><p dir="auto">B</p></th>"#,
                "</tr></thead><tbody><tr>",
                r#"<td align="left"><p dir="auto">1</p></td>"#,
                r#"<td align="right"><p dir="auto">2</p></td>"#,
                "</tr></tbody></table>"
            )
        );
    }

    #[test]
    fn test_code_span_is_never_reinterpreted() {
        assert_eq!(render("`**x**`"), r#"<p dir="auto"><code>**x**</code></p>"#);
    }

    #[test]
    fn test_footnote_links_match() {
        let html = render("first[^2] second[^1]\n\n[^2]: two\n[^1]: one");
        assert!(html.contains(r##"<sup id="footnote-ref-2"><a href="#footnote-2">[2]</a></sup>"##));
        assert!(html.ends_with(concat!(
            r#"<section class="footnotes" dir="auto"><h2>Footnotes</h2><ol>"#,
            r##"<li id="footnote-2">two <a href="#footnote-ref-2">↩</a></li>"##,
            r##"<li id="footnote-1">one <a href="#footnote-ref-1">↩</a></li>"##,
            "</ol></section>"
        )));
    }

    #[test]
    fn test_unknown_custom_block_does_not_fail() {
        assert_eq!(
            render("...mystery\nanything\n..."),
            r#"<div class="persian mystery"></div>"#
        );
    }

    #[test]
    fn test_poetry_and_alert() {
        assert_eq!(
            render("...شعر\nیک -- دو\n..."),
            r#"<div class="persian poet"><div class="stanza">یک</div><div class="stanza">دو</div></div>"#
        );
        assert_eq!(
            render("...توجه\n**مهم**\n..."),
            concat!(
                r#"<div class="persian note"><div class="alert note" dir="auto">"#,
                r#"<div class="alert-title">توجه</div><div class="alert-content">"#,
                r#"<p dir="auto"><strong>مهم</strong></p></div></div></div>"#
            )
        );
        assert_eq!(
            render("...نکته\nیک\nدو\n...")
                .matches(r#"<div class="alert tip" dir="auto">"#)
                .count(),
            2
        );
    }

    #[test]
    fn test_identical_headings_share_slug() {
        let result = MarkdownRenderer::new()
            .render_markdown("## Setup\n## Setup")
            .unwrap();
        assert_eq!(result.toc[0].id, "setup");
        assert_eq!(result.toc[0], result.toc[1]);
        assert_eq!(result.html.matches(r#"id="setup""#).count(), 2);
    }

    #[test]
    fn test_toc_includes_nested_headings() {
        let result = MarkdownRenderer::new()
            .render_markdown("# Top *one*\n> ## Quoted")
            .unwrap();
        assert_eq!(
            result.toc,
            vec![
                TocEntry {
                    level: 1,
                    title: "Top one".to_owned(),
                    id: "top-one".to_owned(),
                },
                TocEntry {
                    level: 2,
                    title: "Quoted".to_owned(),
                    id: "quoted".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let html = render("![\"<x>\"](a&b.png)\n```\"lang\"\n```");
        assert!(html.contains(r#"<img src="a&amp;b.png" alt="&quot;&lt;x&gt;&quot;">"#));
        assert!(html.contains(r#"class="language-&quot;lang&quot;""#));
    }

    #[test]
    fn test_recursion_limit_is_an_error() {
        let result = MarkdownRenderer::new()
            .with_max_depth(3)
            .render_markdown("> > > > too deep");
        assert!(matches!(
            result,
            Err(RenderError::RecursionLimitExceeded { limit: 3 })
        ));
    }

    struct Marker;

    impl Plugin for Marker {
        fn before_parse(&self, text: String) -> String {
            text.replace(":)", "🙂")
        }

        fn after_render(&self, html: String) -> String {
            format!("<article>{html}</article>")
        }
    }

    #[test]
    fn test_plugins_wrap_the_pipeline() {
        let renderer = MarkdownRenderer::new().with_plugin(Marker);
        assert_eq!(renderer.plugins().len(), 1);
        let html = renderer.render_markdown("hi :)").unwrap().html;
        assert_eq!(html, r#"<article><p dir="auto">hi 🙂</p></article>"#);
    }

    #[test]
    fn test_renderer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkdownRenderer>();
    }

    #[test]
    fn test_empty_document() {
        let result = MarkdownRenderer::default().render_markdown("").unwrap();
        assert_eq!(result.html, "");
        assert!(result.toc.is_empty());
    }
}
