use thiserror::Error;

use crate::{application::configuration::BlogConfig, domain::types::Parser};

/// Per-request switches derived from the active [`BlogConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Rewrite fenced code blocks into syntax-highlighted markup (markdown only).
    pub highlight_code_syntax: bool,
    /// Run converter output through the HTML sanitiser. Raw HTML is never sanitised.
    pub sanitize_output: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            highlight_code_syntax: true,
            sanitize_output: false,
        }
    }
}

impl From<&BlogConfig> for RenderOptions {
    fn from(config: &BlogConfig) -> Self {
        Self {
            highlight_code_syntax: config.highlight_code_syntax,
            sanitize_output: config.sanitize_output,
        }
    }
}

/// Rendering request passed into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub parser: Parser,
    /// Stored content as authored.
    pub source: String,
    pub options: RenderOptions,
}

impl RenderRequest {
    pub fn new(parser: Parser, source: impl Into<String>) -> Self {
        Self {
            parser,
            source: source.into(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

/// Deterministic rendering result returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub html: String,
    /// Indicates whether highlighted code blocks were emitted, so hosts can
    /// include the highlight stylesheet only when needed.
    pub contains_code: bool,
}

impl RenderOutput {
    pub fn plain(html: String) -> Self {
        Self {
            html,
            contains_code: false,
        }
    }
}

/// Structured errors surfaced by the rendering pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("markdown rendering failed: {message}")]
    Markdown { message: String },
    #[error("syntax highlighting failed: {language}: {message}")]
    Highlighting { language: String, message: String },
}

/// Trait exposed by the rendering pipeline. Implementations must be pure and
/// deterministic: given the same input, they return identical outputs or errors.
pub trait RenderService: Send + Sync {
    fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError>;
}
