//! Persian markdown to HTML engine.
//!
//! Wraps [`shahneshan_renderer`] with configuration, file rendering and
//! logging. Failures are logged through `tracing`; installing a subscriber is
//! left to the host application.
//!
//! # Example
//!
//! ```
//! use shahneshan::{RenderConfig, ShahNeshan};
//!
//! let engine = ShahNeshan::new(RenderConfig::default());
//! let html = engine.render_markdown("...توجه\nبه این نکته دقت کنید\n...");
//! assert!(html.contains(r#"<div class="alert-title">توجه</div>"#));
//! ```

mod config;
mod engine;
mod error;

pub use config::{ConfigOverrides, OutputFormat, RenderConfig};
pub use engine::{FILE_NOT_FOUND_HTML, NESTING_TOO_DEEP_HTML, ShahNeshan};
pub use error::EngineError;
pub use shahneshan_renderer::{
    Content, MarkdownRenderer, Node, Plugin, RenderError, RenderResult, TocEntry,
};
