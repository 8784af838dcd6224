//! Extension hooks around scanning and rendering.
//!
//! A [`Plugin`] may rewrite the raw markdown before scanning, replace
//! top-level nodes after scanning, and rewrite the final HTML. Every hook
//! defaults to identity, so a plugin only implements the stages it cares
//! about.
//!
//! # Example
//!
//! ```
//! use shahneshan_renderer::{MarkdownRenderer, Plugin};
//!
//! struct Shout;
//!
//! impl Plugin for Shout {
//!     fn after_render(&self, html: String) -> String {
//!         html.to_uppercase()
//!     }
//! }
//!
//! let renderer = MarkdownRenderer::new().with_plugin(Shout);
//! let result = renderer.render_markdown("hello").unwrap();
//! assert_eq!(result.html, "<P DIR=\"AUTO\">HELLO</P>");
//! ```

use crate::node::Node;

/// Hooks applied at the three pipeline stages.
pub trait Plugin: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Rewrite the markdown source. Runs once per document.
    fn before_parse(&self, text: String) -> String {
        text
    }

    /// Replace a top-level node. Runs once per top-level node, in document order.
    fn transform_node(&self, node: Node) -> Node {
        node
    }

    /// Rewrite the rendered HTML. Runs once per render.
    fn after_render(&self, html: String) -> String {
        html
    }
}

/// Ordered collection of plugins, folded in registration order.
#[derive(Default)]
pub struct Plugins {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Plugins {
    /// Create an empty plugin list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin after the existing ones.
    pub fn push(&mut self, plugin: impl Plugin + 'static) {
        self.plugins.push(Box::new(plugin));
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check whether no plugin is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Names of the registered plugins, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.name())
    }

    pub(crate) fn apply_before_parse(&self, text: String) -> String {
        self.plugins
            .iter()
            .fold(text, |text, plugin| plugin.before_parse(text))
    }

    pub(crate) fn apply_transform_node(&self, node: Node) -> Node {
        self.plugins
            .iter()
            .fold(node, |node, plugin| plugin.transform_node(node))
    }

    pub(crate) fn apply_after_render(&self, html: String) -> String {
        self.plugins
            .iter()
            .fold(html, |html, plugin| plugin.after_render(html))
    }
}

impl std::fmt::Debug for Plugins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Append(&'static str);

    impl Plugin for Append {
        fn name(&self) -> &str {
            self.0
        }

        fn before_parse(&self, text: String) -> String {
            format!("{text}{}", self.0)
        }

        fn after_render(&self, html: String) -> String {
            format!("{html}{}", self.0)
        }
    }

    struct Identity;

    impl Plugin for Identity {}

    #[test]
    fn test_hooks_fold_in_registration_order() {
        let mut plugins = Plugins::new();
        plugins.push(Append("a"));
        plugins.push(Append("b"));

        assert_eq!(plugins.apply_before_parse("x".to_owned()), "xab");
        assert_eq!(plugins.apply_after_render("y".to_owned()), "yab");
    }

    #[test]
    fn test_default_hooks_are_identity() {
        let mut plugins = Plugins::new();
        plugins.push(Identity);

        let node = Node::paragraph("text");
        assert_eq!(plugins.apply_transform_node(node.clone()), node);
        assert_eq!(plugins.apply_before_parse("md".to_owned()), "md");
        assert_eq!(plugins.apply_after_render("html".to_owned()), "html");
    }

    #[test]
    fn test_default_name_is_type_name() {
        let mut plugins = Plugins::new();
        plugins.push(Identity);
        plugins.push(Append("custom"));

        let names: Vec<&str> = plugins.names().collect();
        assert!(names[0].ends_with("Identity"));
        assert_eq!(names[1], "custom");
        assert_eq!(plugins.len(), 2);
    }
}
