use thiserror::Error;

/// Raised when the configured content parser cannot be honoured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unsupported parser `{value}` (expected one of: markdown, textile, html)")]
    UnsupportedParser { value: String },
}

impl ConfigurationError {
    pub fn unsupported_parser(value: impl Into<String>) -> Self {
        Self::UnsupportedParser {
            value: value.into(),
        }
    }
}
