use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    application::{
        helpers::{RouteError, TagError},
        render::RenderError,
    },
    config::LoadError,
    domain::error::ConfigurationError,
    infra::error::InfraError,
};

/// Top-level error surfaced by the `blogkit` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Settings(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl AppError {
    /// The error message followed by every source in its chain.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut current = self.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        messages
    }
}
