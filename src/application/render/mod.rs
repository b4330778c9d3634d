//! Content rendering for blog posts and comments.
//!
//! The pipeline is pure: it accepts stored text plus the parser to use and
//! produces deterministic HTML, surfacing structured errors. Which parser runs
//! is decided per call by [`ContentFormatter`] from the active configuration.

mod formatter;
mod service;
mod types;

pub use formatter::ContentFormatter;
pub use service::{HIGHLIGHT_CSS, MarkupRenderService, render_service};
pub use types::{RenderError, RenderOptions, RenderOutput, RenderRequest, RenderService};
