use std::sync::Arc;

use tracing::debug;

use crate::application::configuration::ConfigHandle;

use super::{
    service::render_service,
    types::{RenderError, RenderOptions, RenderRequest, RenderService},
};

/// Formats stored blog content with whatever parser is configured at call time.
#[derive(Clone)]
pub struct ContentFormatter {
    config: ConfigHandle,
    renderer: Arc<dyn RenderService>,
}

impl ContentFormatter {
    /// Formatter backed by the shared render service.
    pub fn new(config: ConfigHandle) -> Self {
        Self::with_renderer(config, render_service())
    }

    pub fn with_renderer(config: ConfigHandle, renderer: Arc<dyn RenderService>) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Convert `raw_text` into HTML using the configured default parser.
    pub fn format_content(&self, raw_text: &str) -> Result<String, RenderError> {
        let config = self.config.snapshot();
        let request = RenderRequest::new(config.default_parser, raw_text)
            .with_options(RenderOptions::from(&config));

        self.renderer
            .render(&request)
            .map(|output| output.html)
            .inspect_err(|err| {
                debug!(
                    target = "application::render::formatter",
                    parser = %config.default_parser,
                    error = %err,
                    "content formatting failed"
                );
            })
    }
}

impl std::fmt::Debug for ContentFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentFormatter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
