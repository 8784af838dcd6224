//! Error types for scanning and rendering.

/// Error returned when a document cannot be scanned.
///
/// Every input is valid markdown; the only failure is nesting that exceeds
/// the configured recursion ceiling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Blockquotes, list items, table cells or alert lines nest deeper than allowed.
    #[error("Document nesting exceeds the limit of {limit} levels")]
    RecursionLimitExceeded {
        /// Configured maximum depth.
        limit: usize,
    },
}
