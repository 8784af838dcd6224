use std::path::PathBuf;

use shahneshan_renderer::RenderError;

/// Error returned when a document cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Source file not found.
    #[error("Source file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// Source file exists but could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The markdown could not be scanned.
    #[error(transparent)]
    Render(#[from] RenderError),
}
