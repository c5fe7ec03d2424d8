//! Error types for template resolution and rendering

use std::path::PathBuf;

/// Errors raised by the template engine
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// No search path candidate held the named template
    ///
    /// A configuration/deployment error, not a recoverable condition; the
    /// message enumerates every path tried.
    #[error("template not found: `{name}` (searched {})", format_searched(.searched))]
    NotFound {
        /// The requested template name
        name: String,
        /// Every candidate path, in search order
        searched: Vec<PathBuf>,
    },

    /// Template content failed to render against the context
    #[error("template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Template content could not be read
    #[error("template io error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_searched(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
