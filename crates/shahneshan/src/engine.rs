//! The rendering engine.

use std::path::Path;

use shahneshan_renderer::{MarkdownRenderer, Plugin, RenderResult};

use crate::config::{ConfigOverrides, RenderConfig};
use crate::error::EngineError;

/// Returned by [`ShahNeshan::render_file`] when the source cannot be read.
pub const FILE_NOT_FOUND_HTML: &str = "<p>Error: File not found.</p>";

/// Returned by [`ShahNeshan::render_markdown`] when nesting exceeds the depth ceiling.
pub const NESTING_TOO_DEEP_HTML: &str = "<p>Error: Document nesting is too deep.</p>";

/// Markdown to HTML engine.
///
/// Combines a [`RenderConfig`] with a [`MarkdownRenderer`] and its plugins.
/// The infallible [`render_markdown`](Self::render_markdown) and
/// [`render_file`](Self::render_file) log failures and return a placeholder
/// paragraph; the `try_` variants return the typed error instead.
#[derive(Debug)]
pub struct ShahNeshan {
    config: RenderConfig,
    renderer: MarkdownRenderer,
}

impl Default for ShahNeshan {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl ShahNeshan {
    /// Create an engine without plugins.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        let renderer = MarkdownRenderer::new().with_max_depth(config.max_depth);
        Self { config, renderer }
    }

    /// Register a plugin. Hooks run in registration order.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.renderer = self.renderer.with_plugin(plugin);
        self
    }

    /// Merge options over the current configuration.
    pub fn configure(&mut self, overrides: &ConfigOverrides) {
        self.config.apply_overrides(overrides);
        self.renderer = std::mem::take(&mut self.renderer).with_max_depth(self.config.max_depth);
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// Render markdown text.
    pub fn try_render_markdown(&self, markdown: &str) -> Result<RenderResult, EngineError> {
        tracing::debug!(bytes = markdown.len(), "Rendering markdown");
        let result = self.renderer.render_markdown(markdown)?;
        tracing::debug!(
            bytes = result.html.len(),
            headings = result.toc.len(),
            "Rendered markdown"
        );
        Ok(result)
    }

    /// Render markdown text, returning a placeholder paragraph on failure.
    #[must_use]
    pub fn render_markdown(&self, markdown: &str) -> String {
        match self.try_render_markdown(markdown) {
            Ok(result) => result.html,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to render markdown");
                NESTING_TOO_DEEP_HTML.to_owned()
            }
        }
    }

    /// Read and render a markdown file.
    ///
    /// Returns `EngineError::FileNotFound` if the file doesn't exist.
    /// Returns `EngineError::Io` if it cannot be read as UTF-8 text.
    pub fn try_render_file(&self, path: &Path) -> Result<RenderResult, EngineError> {
        if !path.exists() {
            return Err(EngineError::FileNotFound(path.to_path_buf()));
        }
        let markdown = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EngineError::FileNotFound(path.to_path_buf()),
            _ => EngineError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        tracing::debug!(path = %path.display(), "Loaded markdown file");
        self.try_render_markdown(&markdown)
    }

    /// Read and render a markdown file, returning a placeholder paragraph on failure.
    #[must_use]
    pub fn render_file(&self, path: &Path) -> String {
        match self.try_render_file(path) {
            Ok(result) => result.html,
            Err(EngineError::Render(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to render markdown file");
                NESTING_TOO_DEEP_HTML.to_owned()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read markdown file");
                FILE_NOT_FOUND_HTML.to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use shahneshan_renderer::{Node, RenderError};

    use super::*;

    #[test]
    fn test_render_markdown() {
        let engine = ShahNeshan::default();
        assert_eq!(
            engine.render_markdown("# سلام\nمتن **پررنگ**"),
            r#"<h1 id="سلام" dir="auto">سلام</h1><p dir="auto">متن <strong>پررنگ</strong></p>"#
        );
    }

    #[test]
    fn test_render_markdown_too_deep_returns_placeholder() {
        let config = RenderConfig {
            max_depth: 2,
            ..Default::default()
        };
        let engine = ShahNeshan::new(config);
        assert_eq!(engine.render_markdown("> > > x"), NESTING_TOO_DEEP_HTML);
        assert!(matches!(
            engine.try_render_markdown("> > > x"),
            Err(EngineError::Render(RenderError::RecursionLimitExceeded { limit: 2 }))
        ));
    }

    #[test]
    fn test_configure_updates_depth() {
        let mut engine = ShahNeshan::default();
        engine.configure(&ConfigOverrides {
            max_depth: Some(1),
            custom_styles: Some(".poet{}".to_owned()),
            ..Default::default()
        });

        assert_eq!(engine.config().max_depth, 1);
        assert_eq!(engine.config().custom_styles, ".poet{}");
        assert_eq!(engine.renderer().max_depth(), 1);
        assert_eq!(engine.render_markdown("- a"), NESTING_TOO_DEEP_HTML);
    }

    #[test]
    fn test_configure_keeps_plugins() {
        struct Footer;

        impl Plugin for Footer {
            fn after_render(&self, html: String) -> String {
                format!("{html}<footer></footer>")
            }
        }

        let mut engine = ShahNeshan::default().with_plugin(Footer);
        engine.configure(&ConfigOverrides::default());
        assert_eq!(engine.render_markdown("---"), "<hr /><footer></footer>");
    }

    #[test]
    fn test_render_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("doc.md");
        fs::write(&path, "## Title\n\n- [x] done").unwrap();

        let engine = ShahNeshan::default();
        let html = engine.render_file(&path);
        assert!(html.starts_with(r#"<h2 id="title" dir="auto">Title</h2>"#));
        assert!(html.contains(r#"<input type="checkbox" checked disabled>"#));
    }

    #[test]
    fn test_render_file_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.md");

        let engine = ShahNeshan::default();
        assert_eq!(engine.render_file(&path), FILE_NOT_FOUND_HTML);
        assert!(matches!(
            engine.try_render_file(&path),
            Err(EngineError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_render_file_not_utf8() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("binary.md");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let engine = ShahNeshan::default();
        assert!(matches!(
            engine.try_render_file(&path),
            Err(EngineError::Io { .. })
        ));
        assert_eq!(engine.render_file(&path), FILE_NOT_FOUND_HTML);
    }

    #[test]
    fn test_render_directory_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();

        let engine = ShahNeshan::default();
        assert_eq!(engine.render_file(temp_dir.path()), FILE_NOT_FOUND_HTML);
    }

    #[test]
    fn test_toc_serializes() {
        let engine = ShahNeshan::default();
        let result = engine.try_render_markdown("# One\n## Two").unwrap();
        let json = serde_json::to_value(&result.toc).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"level": 1, "title": "One", "id": "one"},
                {"level": 2, "title": "Two", "id": "two"},
            ])
        );
    }

    #[test]
    fn test_parsed_nodes_serialize() {
        let engine = ShahNeshan::default();
        let nodes = engine.renderer().parse("---").unwrap();
        assert_eq!(nodes, vec![Node::ThematicBreak]);
        assert_eq!(
            serde_json::to_value(&nodes).unwrap(),
            serde_json::json!(["ThematicBreak"])
        );
    }
}
