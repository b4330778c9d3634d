//! Runtime configuration read by the formatter and the route facade.
//!
//! A [`ConfigHandle`] is injected into each helper at construction. The
//! process-wide handle returned by [`ConfigHandle::global`] keeps the
//! "configure once at startup, last write wins" behaviour for hosts that do
//! not want to thread a handle through their templates.

use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::domain::{error::ConfigurationError, types::Parser};

/// Options controlling how blog content is rendered and which host helpers leak through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogConfig {
    pub default_parser: Parser,
    pub inline_main_app_named_routes: bool,
    pub highlight_code_syntax: bool,
    pub sanitize_output: bool,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            default_parser: Parser::Markdown,
            inline_main_app_named_routes: false,
            highlight_code_syntax: true,
            sanitize_output: false,
        }
    }
}

impl BlogConfig {
    /// Set the parser from its textual name, rejecting anything unknown.
    pub fn set_default_parser_str(&mut self, value: &str) -> Result<(), ConfigurationError> {
        self.default_parser = value.parse()?;
        Ok(())
    }
}

/// Cloneable, shared view of a [`BlogConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    inner: Arc<RwLock<BlogConfig>>,
}

static GLOBAL_CONFIG: Lazy<ConfigHandle> = Lazy::new(ConfigHandle::default);

impl ConfigHandle {
    pub fn new(config: BlogConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// The process-wide configuration shared by helpers built without an explicit handle.
    pub fn global() -> Self {
        GLOBAL_CONFIG.clone()
    }

    /// Copy of the configuration as it stands now.
    pub fn snapshot(&self) -> BlogConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply an update step in place.
    pub fn configure<F>(&self, update: F)
    where
        F: FnOnce(&mut BlogConfig),
    {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut *guard);
        debug!(
            target = "application::configuration",
            default_parser = %guard.default_parser,
            inline_main_app_named_routes = guard.inline_main_app_named_routes,
            highlight_code_syntax = guard.highlight_code_syntax,
            sanitize_output = guard.sanitize_output,
            "blog configuration updated"
        );
    }

    /// Like [`configure`](Self::configure) for update steps that can fail; the
    /// configuration is left untouched when the step returns an error.
    pub fn try_configure<F, E>(&self, update: F) -> Result<(), E>
    where
        F: FnOnce(&mut BlogConfig) -> Result<(), E>,
    {
        let mut staged = self.snapshot();
        update(&mut staged)?;
        self.configure(|config| *config = staged);
        Ok(())
    }

    pub fn replace(&self, config: BlogConfig) {
        self.configure(|current| *current = config);
    }
}

/// Update the process-wide configuration.
pub fn configure<F>(update: F)
where
    F: FnOnce(&mut BlogConfig),
{
    ConfigHandle::global().configure(update);
}
