//! Persian-aware markdown scanner and HTML renderer.
//!
//! This crate converts a markdown dialect with right-to-left extensions into
//! HTML in two stages:
//!
//! 1. A block scanner turns lines into a tree of [`Node`]s, tracking nested
//!    list indentation, fenced code, `...keyword` custom blocks (poetry and
//!    alert callouts), tables with an optional alignment row, blockquotes and
//!    footnote definitions.
//! 2. An [`HtmlRenderer`] walks the tree into markup, marking list direction
//!    from the script of each item.
//!
//! Both stages are wrapped by [`Plugin`] hooks: text rewriting before the
//! scan, node replacement after it, and HTML rewriting after rendering.
//!
//! # Example
//!
//! ```
//! use shahneshan_renderer::MarkdownRenderer;
//!
//! let markdown = "...شعر\nبشنو این نی چون شکایت می‌کند -- از جدایی‌ها حکایت می‌کند\n...";
//! let result = MarkdownRenderer::new().render_markdown(markdown).unwrap();
//! assert!(result.html.starts_with(r#"<div class="persian poet"><div class="stanza">"#));
//! ```

mod error;
mod html;
mod inline;
mod node;
mod plugin;
mod renderer;
mod scanner;
mod util;

pub use error::RenderError;
pub use html::{HtmlRenderer, render_node};
pub use inline::{format_inline, strip_inline_markdown};
pub use node::{Alignment, AlertKind, Content, CustomKind, ListKind, Node};
pub use plugin::{Plugin, Plugins};
pub use renderer::{DEFAULT_MAX_DEPTH, MarkdownRenderer, RenderResult, TocEntry};
pub use util::{escape_html, is_rtl, slugify};
